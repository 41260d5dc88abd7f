//! Interpreter tests for trellis-api

use std::io::Write;
use trellis_api::*;
use trellis_engine::{HandlerError, HandlerRegistry, SimplePlugin};

const BUS_QUERY: &str = "Hvenær kemur ásinn?";
const BUS_ANNOTATION: &str = "P S-QUE QBusArrivalTime ao so_et_fh_gm_nt_p3 QBus QBusWord \
    no_et_gr_kk_nf /QBusWord /QBus p /QBusArrivalTime /S-QUE /P";

const NAME_SENTENCE: &str = "Ingibjörg Sólrún Gísladóttir mun a.m.k. hitta hópinn á morgun";
const NAME_ANNOTATION: &str = "P S-MAIN IP NP-SUBJ person_kvk_nf person_kvk_nf person_kvk_nf \
    /NP-SUBJ VP-SEQ VP so_et_fh_gm_nt_p3 ADVP ao /ADVP so_1_þf_gm_nh NP-OBJ no_et_gr_kk_þf \
    /NP-OBJ /VP ADVP ADVP-DATE-REL ao ao /ADVP-DATE-REL /ADVP /VP-SEQ /IP /S-MAIN /P";

fn lexicon_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[[words]]
form = "ásinn"
root = "no"
canonical = "ás"
"#
    )
    .unwrap();
    file
}

#[test]
fn test_bus_query_answered() {
    let lexicon = lexicon_file();
    let config = Config::builder().lexicon_path(lexicon.path()).build().unwrap();
    let interpreter = Interpreter::with_config(config).unwrap();

    let output = interpreter
        .process(&Input::new(BUS_QUERY, BUS_ANNOTATION).with_id("q1"))
        .unwrap();

    assert_eq!(output.id.as_deref(), Some("q1"));
    assert!(output.is_answered());
    assert_eq!(
        output.outcome,
        Outcome::Answered {
            qtype: "ArrivalTime".to_string(),
            qkey: Some(serde_json::json!(1)),
        }
    );
    assert_eq!(output.fields["bus_name"], "ásinn");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_statement_not_understood() {
    let output = interpret(NAME_SENTENCE, NAME_ANNOTATION).unwrap();

    assert_eq!(output.outcome, Outcome::NotUnderstood);
    assert_eq!(output.outcome.error_code(), Some("E_QUERY_NOT_UNDERSTOOD"));
    assert_eq!(output.tokens.len(), 6);
    assert_eq!(output.tokens[0].text, "Ingibjörg Sólrún Gísladóttir");
    assert_eq!(output.tokens[0].width, 3);
    assert_eq!(output.tokens[2].text, "a.m.k.");
    assert!(output.aligned.contains("NP-SUBJ person_kvk_nf /NP-SUBJ"));
}

#[test]
fn test_corrupt_annotation_rejected() {
    let annotation = BUS_ANNOTATION.replace(" /QBus ", " ");
    let result = interpret(BUS_QUERY, &annotation);
    assert!(matches!(result, Err(ApiError::Annotation(_))));
}

#[test]
fn test_strict_alignment() {
    let input = Input::new("Hvenær kemur ásinn í dag?", BUS_ANNOTATION);

    let lenient = Interpreter::new().unwrap().process(&input).unwrap();
    assert_eq!(lenient.warnings.len(), 1);
    assert_eq!(lenient.tokens.len(), 4);

    let strict = Interpreter::with_config(Config::strict()).unwrap();
    assert!(matches!(
        strict.process(&input),
        Err(ApiError::Alignment(warning)) if warning.tokens == 6
    ));
}

#[test]
fn test_handler_failure_is_an_outcome() {
    let registry = HandlerRegistry::builder()
        .plugin(
            &SimplePlugin::new("broken")
                .grammar("QBroken → 'bilað'")
                .handler("QBroken", |_, _, _| Err(HandlerError::failed("out of order"))),
        )
        .build()
        .unwrap();
    let interpreter = Interpreter::new().unwrap().with_registry(registry);

    let output = interpreter
        .process(&Input::new("bilað", "QBroken lo_nf /QBroken"))
        .unwrap();
    assert_eq!(
        output.outcome,
        Outcome::Failed {
            error: "E_EXCEPTION: out of order".to_string()
        }
    );
    assert!(output.fields.is_empty());
}

#[test]
fn test_custom_tokenizer() {
    let interpreter = Interpreter::new()
        .unwrap()
        .with_tokenizer(|s: &str| trellis_core::SurfaceToken::words(s));
    let output = interpreter
        .process(&Input::new("kemur ásinn?", "P so_et_fh no_et_gr_kk_nf /P"))
        .unwrap();
    assert_eq!(output.tokens[1].text, "ásinn?");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_batch_preserves_order() {
    let inputs = vec![
        Input::new(BUS_QUERY, BUS_ANNOTATION).with_id("a"),
        Input::new(BUS_QUERY, "P /S").with_id("b"),
        Input::new(NAME_SENTENCE, NAME_ANNOTATION).with_id("c"),
    ];
    let config = Config::builder().threads(Some(2)).build().unwrap();
    let results = Interpreter::with_config(config)
        .unwrap()
        .process_batch(&inputs)
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().id.as_deref(), Some("a"));
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().id.as_deref(), Some("c"));

    let summary = BatchSummary::from_results(&results);
    assert_eq!(
        summary,
        BatchSummary {
            total: 3,
            answered: 1,
            not_understood: 1,
            failed: 0,
            rejected: 1,
            warnings: 0,
        }
    );
}

#[test]
#[cfg(feature = "serde")]
fn test_json_lines_round_trip() {
    let lines = format!(
        "{}\n\n{}\n",
        serde_json::json!({"id": "1", "sentence": BUS_QUERY, "annotation": BUS_ANNOTATION}),
        serde_json::json!({"sentence": NAME_SENTENCE, "annotation": NAME_ANNOTATION}),
    );
    let inputs = Input::from_json_lines(&lines).unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].id.as_deref(), Some("1"));
    assert_eq!(inputs[1].id, None);

    let output = Interpreter::new().unwrap().process(&inputs[0]).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["outcome"]["status"], "answered");
    assert_eq!(json["outcome"]["qtype"], "ArrivalTime");

    let back: Interpretation = serde_json::from_value(json).unwrap();
    assert_eq!(back, output);
}

#[test]
#[cfg(feature = "serde")]
fn test_json_lines_error() {
    assert!(matches!(
        Input::from_json_lines("{\"sentence\": 1}"),
        Err(ApiError::Serde(_))
    ));
}
