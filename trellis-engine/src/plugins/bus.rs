//! Bus schedule queries
//!
//! Recognises questions such as "Hvenær kemur ásinn?" and resolves the bus
//! they name to a route number. The query type is `ArrivalTime` and the
//! query key is the route number.

use crate::accumulator::Accumulator;
use crate::error::HandlerError;
use crate::plugin::{handler, Handler, Params, QueryPlugin};
use trellis_core::Node;

const GRAMMAR: &str = include_str!("../../grammars/bus.grammar");

/// Query type set for arrival time questions
pub const ARRIVAL_TIME: &str = "ArrivalTime";

/// Field holding the resolved route number
pub const BUS_NUMBER: &str = "bus_number";

/// Field holding the bus as named in the question, in the nominative
pub const BUS_NAME: &str = "bus_name";

const BUS_WORDS: &[(&str, i64)] = &[
    ("ás", 1),
    ("tvistur", 2),
    ("þristur", 3),
    ("fjarki", 4),
    ("fimma", 5),
    ("sexa", 6),
    ("sjöa", 7),
    ("átta", 8),
    ("nía", 9),
    ("tía", 10),
    ("tólfa", 12),
    ("einn", 1),
    ("eitt", 1),
    ("tveir", 2),
    ("þrír", 3),
    ("fjórir", 4),
    ("fimm", 5),
    ("sex", 6),
    ("sjö", 7),
    ("níu", 9),
    ("tíu", 10),
    ("ellefu", 11),
    ("tólf", 12),
    ("þrettán", 13),
    ("fjórtán", 14),
    ("fimmtán", 15),
    ("sextán", 16),
    ("sautján", 17),
    ("átján", 18),
    ("nítján", 19),
    ("tuttugu", 20),
    ("þrjátíu", 30),
    ("fjörutíu", 40),
    ("fimmtíu", 50),
    ("sextíu", 60),
    ("sjötíu", 70),
    ("áttatíu", 80),
    ("níutíu", 90),
];

/// Route number for a bus word, number word or numeral; 0 when unknown
pub fn bus_number(canonical: &str) -> i64 {
    let word = canonical.trim().to_lowercase();
    BUS_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|&(_, number)| number)
        .or_else(|| word.parse().ok())
        .unwrap_or(0)
}

/// The bus schedule plug-in
#[derive(Debug, Clone, Copy, Default)]
pub struct BusPlugin;

impl QueryPlugin for BusPlugin {
    fn name(&self) -> &str {
        "bus"
    }

    fn grammar(&self) -> &str {
        GRAMMAR
    }

    fn handlers(&self) -> Vec<(String, Handler)> {
        vec![
            ("QBusArrivalTime".to_string(), handler(arrival_time)),
            ("QBus".to_string(), handler(bus)),
            ("QBusWord".to_string(), handler(bus_word)),
            ("QBusNumber".to_string(), handler(bus_route)),
            ("QBusNumberWord".to_string(), handler(bus_number_word)),
        ]
    }
}

fn arrival_time(_: &Node, _: &Params<'_>, acc: &mut Accumulator) -> Result<(), HandlerError> {
    acc.set_qtype(ARRIVAL_TIME);
    if let Some(number) = acc.get(BUS_NUMBER).cloned() {
        acc.set_qkey(number);
    }
    Ok(())
}

fn bus(_: &Node, _: &Params<'_>, _: &mut Accumulator) -> Result<(), HandlerError> {
    Ok(())
}

fn bus_word(_: &Node, _: &Params<'_>, acc: &mut Accumulator) -> Result<(), HandlerError> {
    let number = bus_number(acc.canonical());
    log::debug!("translated bus word '{}' to {}", acc.canonical(), number);
    acc.set(BUS_NAME, acc.nominative().to_string());
    acc.set(BUS_NUMBER, number);
    Ok(())
}

fn bus_route(_: &Node, _: &Params<'_>, acc: &mut Accumulator) -> Result<(), HandlerError> {
    acc.set(BUS_NAME, acc.nominative().to_string());
    Ok(())
}

fn bus_number_word(_: &Node, _: &Params<'_>, acc: &mut Accumulator) -> Result<(), HandlerError> {
    let number = bus_number(acc.canonical());
    log::debug!("translated number word '{}' to {}", acc.canonical(), number);
    acc.set(BUS_NUMBER, number);
    Ok(())
}
