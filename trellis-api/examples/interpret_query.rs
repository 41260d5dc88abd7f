//! Interpret a bus schedule question and print the outcome

use trellis_api::{Input, Interpreter, Outcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let interpreter = Interpreter::new()?;

    let input = Input::new(
        "Hvenær kemur strætó númer fjórtán?",
        "P S-QUE QBusArrivalTime ao so_et_fh_gm_nt_p3 QBus QBusNumber no_et_kk_nf no_et_hk_nf \
         QBusNumberWord tö_ft_hk_nf /QBusNumberWord /QBusNumber /QBus p /QBusArrivalTime /S-QUE /P",
    );
    let output = interpreter.process(&input)?;

    println!("Aligned tree: {}", output.aligned);
    for token in &output.tokens {
        println!("  [{}..{}] {}", token.start, token.end, token.text);
    }
    match &output.outcome {
        Outcome::Answered { qtype, qkey } => println!("{qtype}: {qkey:?}"),
        other => println!("not answered: {:?}", other.error_code()),
    }
    Ok(())
}
