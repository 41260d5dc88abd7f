//! Terminal tags and their grammatical feature bundles
//!
//! A terminal tag is a part-of-speech root followed by underscore-joined
//! feature codes, e.g. `so_1_þf_gm_nh` or `no_et_gr_kk_þf`. The codes are
//! parsed once into [`Features`] so that nothing downstream slices tag
//! strings by hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Separator between the root and the feature codes of a terminal tag
pub const FEATURE_SEPARATOR: char = '_';

macro_rules! feature_codes {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $code)] $variant),+
        }

        impl $name {
            /// Parse a feature code
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The feature code as written in tags
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

feature_codes!(
    /// Grammatical case
    Case {
        /// Nominative
        Nominative => "nf",
        /// Accusative
        Accusative => "þf",
        /// Dative
        Dative => "þgf",
        /// Genitive
        Genitive => "ef",
    }
);

feature_codes!(
    /// Grammatical number
    Number {
        /// Singular
        Singular => "et",
        /// Plural
        Plural => "ft",
    }
);

feature_codes!(
    /// Grammatical gender
    Gender {
        /// Masculine
        Masculine => "kk",
        /// Feminine
        Feminine => "kvk",
        /// Neuter
        Neuter => "hk",
    }
);

feature_codes!(
    /// Grammatical person
    Person {
        /// First person
        First => "p1",
        /// Second person
        Second => "p2",
        /// Third person
        Third => "p3",
    }
);

feature_codes!(
    /// Verb tense
    Tense {
        /// Present
        Present => "nt",
        /// Past
        Past => "þt",
    }
);

feature_codes!(
    /// Verb mood or verbal form
    Mood {
        /// Indicative
        Indicative => "fh",
        /// Subjunctive
        Subjunctive => "vh",
        /// Infinitive
        Infinitive => "nh",
        /// Imperative
        Imperative => "bh",
        /// Present participle
        PresentParticiple => "lhnt",
        /// Past participle
        PastParticiple => "lhþt",
        /// Supine
        Supine => "sagnb",
    }
);

feature_codes!(
    /// Verb voice
    Voice {
        /// Active
        Active => "gm",
        /// Middle
        Middle => "mm",
    }
);

feature_codes!(
    /// Adjective and adverb degree
    Degree {
        /// Positive
        Positive => "fst",
        /// Comparative
        Comparative => "mst",
        /// Superlative
        Superlative => "est",
        /// Strong superlative
        StrongSuperlative => "esb",
        /// Weak superlative
        WeakSuperlative => "evb",
    }
);

feature_codes!(
    /// Strong or weak inflection
    Inflection {
        /// Strong
        Strong => "sb",
        /// Weak
        Weak => "vb",
    }
);

/// Code marking a definite (suffixed) article
pub const ARTICLE_CODE: &str = "gr";

/// Grammatical features parsed from a terminal tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    /// Case of the word itself
    pub case: Option<Case>,
    /// Number
    pub number: Option<Number>,
    /// Gender
    pub gender: Option<Gender>,
    /// Person
    pub person: Option<Person>,
    /// Tense
    pub tense: Option<Tense>,
    /// Mood
    pub mood: Option<Mood>,
    /// Voice
    pub voice: Option<Voice>,
    /// Degree
    pub degree: Option<Degree>,
    /// Strong or weak inflection
    pub inflection: Option<Inflection>,
    /// Definite article attached
    pub article: bool,
    /// Number of verb arguments
    pub arity: Option<u8>,
    /// Cases governed by the verb arguments
    pub argument_cases: SmallVec<[Case; 2]>,
    /// Codes not recognised above, kept in order
    pub other: SmallVec<[String; 2]>,
}

impl Features {
    /// Parse underscore separated feature codes
    pub fn parse<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut features = Features::default();
        let mut pending_arguments = 0u8;

        for code in codes {
            if let Ok(arity) = code.parse::<u8>() {
                features.arity = Some(arity);
                pending_arguments = arity;
                continue;
            }
            if let Some(case) = Case::from_code(code) {
                if pending_arguments > 0 {
                    features.argument_cases.push(case);
                    pending_arguments -= 1;
                } else {
                    features.case = Some(case);
                }
                continue;
            }
            if code == ARTICLE_CODE {
                features.article = true;
            } else if let Some(number) = Number::from_code(code) {
                features.number = Some(number);
            } else if let Some(gender) = Gender::from_code(code) {
                features.gender = Some(gender);
            } else if let Some(person) = Person::from_code(code) {
                features.person = Some(person);
            } else if let Some(tense) = Tense::from_code(code) {
                features.tense = Some(tense);
            } else if let Some(mood) = Mood::from_code(code) {
                features.mood = Some(mood);
            } else if let Some(voice) = Voice::from_code(code) {
                features.voice = Some(voice);
            } else if let Some(degree) = Degree::from_code(code) {
                features.degree = Some(degree);
            } else if let Some(inflection) = Inflection::from_code(code) {
                features.inflection = Some(inflection);
            } else {
                features.other.push(code.to_string());
            }
        }

        features
    }
}

/// A terminal tag split into its root and parsed features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalTag {
    raw: String,
    root_len: usize,
    features: Features,
}

impl TerminalTag {
    /// Parse a terminal tag
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut parts = raw.split(FEATURE_SEPARATOR);
        let root_len = parts.next().map_or(0, str::len);
        let features = Features::parse(parts.filter(|code| !code.is_empty()));
        Self {
            raw,
            root_len,
            features,
        }
    }

    /// The full tag text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The part-of-speech root, the portion before any feature code
    pub fn root(&self) -> &str {
        &self.raw[..self.root_len]
    }

    /// Parsed feature bundle
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Whether two tags share the same root
    pub fn same_root(&self, other: &TerminalTag) -> bool {
        self.root() == other.root()
    }
}

impl fmt::Display for TerminalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
