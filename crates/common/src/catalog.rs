//! Built-in fixture catalog
//!
//! The reference suite written to a fresh fixture workbook by
//! `singlish-test generate`: 24 positive functional cases, 10 negative
//! functional cases and one UI case.

use crate::types::{CaseKind, LengthClass, Polarity, TestCase};

struct Entry {
    id: &'static str,
    name: &'static str,
    length: LengthClass,
    input: &'static str,
    expected: &'static str,
    justification: &'static str,
    category: &'static str,
}

const POSITIVE: &[Entry] = &[
    Entry {
        id: "Pos_Fun_0001",
        name: "Entrance of attendance in a Sri Lankan",
        length: LengthClass::M,
        input: "mama gedhara yanawa, habayi vahi na nisa dhenma yanne naha",
        expected: "මම ගෙදර යනවා, හැබැයි වහින නිසා දැන්ම යන්නේ නෑ",
        justification: "Two clauses correctly joined. Conjunction 'habayi' properly rendered.",
        category: "Compound sentence\nWord combination / phrase pattern\nM (31–299 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0002",
        name: "Condition of different sentences",
        length: LengthClass::S,
        input: "vassa nathnam yanna epayi.",
        expected: "වැස්ස නැත්නම් යන්න එපයි.",
        justification: "Conditional logic preserved. Verb 'epayi' correctly converted.",
        category: "Complex sentence\nDaily language usage\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0003",
        name: "Direct command",
        length: LengthClass::S,
        input: "israhata yana.",
        expected: "ඉස්සරහට යන්න.",
        justification: "Direct imperative correctly transliterated. No extra words.",
        category: "Imperative (command)\nDaily language usage\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0004",
        name: "Positive future tense",
        length: LengthClass::S,
        input: "api heta ennam.",
        expected: "අපි හෙට එන්නම්.",
        justification: "Future tense correctly expressed. Plural pronoun 'api' properly rendered.",
        category: "Future tense\nInformal\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0005",
        name: "Negative present tense",
        length: LengthClass::S,
        input: "api heta ennee naha.",
        expected: "අපි හෙට එන්නේ නැහැ.",
        justification: "Negation pattern correctly converted. Meaning preserved.",
        category: "Negative (affirmative form)\nPresent tense\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0006",
        name: "Common greeting with exclamation",
        length: LengthClass::S,
        input: "ayubovan!",
        expected: "ආයුබෝවන්!",
        justification: "Standard greeting correctly transliterated. Exclamation retained.",
        category: "Simple sentence\nAccuracy validation\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0007",
        name: "Informal colloquial phrase",
        length: LengthClass::S,
        input: "ayi, meka dhiyan",
        expected: "ඇයි, මේක දියන්.",
        justification: "Colloquial words correctly rendered. Informational tone preserved.",
        category: "Informal language\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0008",
        name: "Daily expression of feeling",
        length: LengthClass::S,
        input: "karuNaakaralaa mata podi udhavvak karanna puLuvandha?",
        expected: "කරුණාකරලා මට පොඩි උදව්වක් කරන්න පුළුවන්ද?",
        justification: "Polite phrasing maintained.",
        category: "Polite phrasing\ninterrogative\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0009",
        name: "Informal command",
        length: LengthClass::S,
        input: "eeka dhenna.",
        expected: "ඒක දෙන්න.",
        justification: "Casual tone converted.",
        category: "Informal phrasing\nimperative\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0010",
        name: "Day-to-day expression",
        length: LengthClass::S,
        input: "mata nidhimathayi.",
        expected: "මට නිදිමතයි.",
        justification: "Common phrase accurate.",
        category: "Daily language\nSimple sentence\nS (≤30 characters)\nFormatting preservation",
    },
    Entry {
        id: "Pos_Fun_0011",
        name: "Multi-word collocation",
        length: LengthClass::S,
        input: "mata oona",
        expected: "මට ඕන",
        justification: "Frequent pair handled",
        category: "Word combination\nSimple sentence\nS (≤30 characters)\nFormatting preservation",
    },
    Entry {
        id: "Pos_Fun_0012",
        name: "Proper spacing",
        length: LengthClass::S,
        input: "mama gedhara yanawa.",
        expected: "මම ගෙදර යනවා.",
        justification: "Words segmented correctly",
        category: "Proper spacing\nS (≤30 characters)\nReal-time output update behavior",
    },
    Entry {
        id: "Pos_Fun_0013",
        name: "Repeated emphasis",
        length: LengthClass::S,
        input: "hari hari",
        expected: "හරි හරි",
        justification: "Duplication preserved.",
        category: "Repeated words\nSimple sentence\nS (≤30 characters)",
    },
    Entry {
        id: "Pos_Fun_0014",
        name: "Past tense singular",
        length: LengthClass::S,
        input: "mama iiyee gedhara giya.",
        expected: "මම ඊයේ ගෙදර ගියා.",
        justification: "Past form for singular pronoun.",
        category: "Past tense\nsingular pronoun\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0015",
        name: "Present plural",
        length: LengthClass::S,
        input: "api kaeema kanawa.",
        expected: "අපි කෑම කනවා.",
        justification: "Plural pronoun correct.",
        category: "Present tense\nPlural usage\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0016",
        name: "Future plural",
        length: LengthClass::S,
        input: "api yamu.",
        expected: "අපි යමු.",
        justification: "Group future action",
        category: "Future tense\nPlural pronoun\nS (≤30 characters)\nReal-time output update behavior",
    },
    Entry {
        id: "Pos_Fun_0017",
        name: "Mixed English words",
        length: LengthClass::M,
        input: "online class ekak thiyennee.",
        expected: "online class එකක් තියෙන්නේ.",
        justification: "online unchanged, rest converted.",
        category: "Mixed Singlish+English\ntechnical terms\nM (31–299 characters)\nRobustness validation",
    },
    Entry {
        id: "Pos_Fun_0018",
        name: "Places and English words",
        length: LengthClass::M,
        input: "mama Kandy yanna hadhannee.",
        expected: "මම Kandy යන්න හදන්නේ.",
        justification: "Kandy preserved.",
        category: "Mixed Singlish + English\nPresent tense\nM (31–299 characters)\nRobustness validation",
    },
    Entry {
        id: "Pos_Fun_0019",
        name: "Abbreviations",
        length: LengthClass::S,
        input: "LOL",
        expected: "LOL",
        justification: "Short forms intact",
        category: "English abbreviations\nWord combination\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0020",
        name: "Currency",
        length: LengthClass::S,
        input: "Rs. 500",
        expected: "Rs. 500",
        justification: "Formats preserved.",
        category: "Currency\nS (≤30 characters)\nFormatting preservation",
    },
    Entry {
        id: "Pos_Fun_0021",
        name: "Multiple spaces",
        length: LengthClass::S,
        input: "mama gedhara yanawa.",
        expected: "මම ගෙදර යනවා.",
        justification: "Extra spaces handled.",
        category: "Formatting\nSimple sentence\nS (≤30 characters)\nAccuracy validation",
    },
    Entry {
        id: "Pos_Fun_0022",
        name: "Long paragraph input",
        length: LengthClass::L,
        input: "dhitvaa suLi kuNaatuva ... bimal rathnaayaka saDHahan kaLeeya.",
        expected: "දිට්වා සුළි කුණාටුව ... බිමල් රත්නායක සඳහන් කළේය.",
        justification: "Full text converted",
        category: "Informal language\nPast tense\nL (≥ 300 characters)\nFormatting preservation",
    },
    Entry {
        id: "Pos_Fun_0023",
        name: "Punctuation variety",
        length: LengthClass::S,
        input: "hari? (oyaa)",
        expected: "හරි? (ඔයා)",
        justification: "Marks preserved.",
        category: "Punctuation\nPronoun variation\nS (≤30 characters)\nFormatting preservation",
    },
    Entry {
        id: "Pos_Fun_0024",
        name: "Interrogative sentence",
        length: LengthClass::S,
        input: "oyaa kohomadha?",
        expected: "ඔයා කොහොමද?",
        justification: "Question form correctly converted.",
        category: "Interrogative\nSimple sentence\nS (≤30 characters)\nAccuracy validation",
    },
];

const NEGATIVE: &[Entry] = &[
    Entry {
        id: "Neg_Fun_0001",
        name: "Joined words no spaces",
        length: LengthClass::S,
        input: "mamagedharayanawa",
        expected: "මම ගෙදර යනවා.",
        justification: "Incorrect segmentation or partial fail.",
        category: "Joined words\nPresent tense\nS (≤30 characters)\nrobustness",
    },
    Entry {
        id: "Neg_Fun_0002",
        name: "Heavy slang",
        length: LengthClass::S,
        input: "ela machan!",
        expected: "එළ මචං!",
        justification: "Slang not fully handled",
        category: "Slang / informal language\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0003",
        name: "Chat shorthand",
        length: LengthClass::S,
        input: "thnx bn!",
        expected: "thanks බං!",
        justification: "Unchanged or garbled per note",
        category: "Slang\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0004",
        name: "No space",
        length: LengthClass::M,
        input: "Oya gedara yanava.mamath enava",
        expected: "ඔයා ගෙදර යනවා.මමත් එනවා",
        justification: "Fail to convert rightly",
        category: "Formatting\nCompound sentence\nM (31–299 characters)\nFormatting preservation",
    },
    Entry {
        id: "Neg_Fun_0005",
        name: "Sentence convert Inconsistent",
        length: LengthClass::S,
        input: "mokakhari karapu wade",
        expected: "මොකක් හරි කරපු වැඩේ",
        justification: "System fail to join words correctly",
        category: "Informal language\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0006",
        name: "Repeated slang emphasis",
        length: LengthClass::S,
        input: "ayi mokadha wenne",
        expected: "ඇයි මොකද වෙන්නේ",
        justification: "Emphasis slang fails.",
        category: "Repeated slang\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0007",
        name: "Abbreviations",
        length: LengthClass::S,
        input: "LVMH",
        expected: "Love you so Much",
        justification: "Not preserved correctly.",
        category: "English abbreviations\nWord combination\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0008",
        name: "Polite with slang",
        length: LengthClass::S,
        input: "Please... kiyahanko",
        expected: "කරුණාකරලා... කියහන්කෝ",
        justification: "Mix fails.",
        category: "Slang\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0009",
        name: "Negation with joined",
        length: LengthClass::S,
        input: "kiyanne naha",
        expected: "කියන්නේ නෑ",
        justification: "Negation pattern broken.",
        category: "Daily language usage\nNegation\nS (≤30 characters)\nRobustness validation",
    },
    Entry {
        id: "Neg_Fun_0010",
        name: "Mixed case English abbreviation",
        length: LengthClass::S,
        input: "Hi oyaa hodindha?",
        expected: "hello ඔයාට කොහොමද",
        justification: "Fail to convert rightly",
        category: "Greeting\nSimple sentence\nS (≤30 characters)\nRobustness validation",
    },
];

const UI: &[Entry] = &[Entry {
    id: "Pos_UI_0001",
    name: "Real-time output update",
    length: LengthClass::S,
    input: "mama game yanava",
    expected: "මම ගෙදර යනවා",
    justification: "Output updates live without lag",
    category: "Formatting\nPresent tense\nS (≤30 characters)\nIssue handling / input validation",
}];

impl Entry {
    fn to_case(&self) -> TestCase {
        TestCase::new(self.id, self.name, self.input, self.expected)
            .with_length(self.length)
            .with_justification(self.justification)
            .with_category(self.category)
    }
}

/// Every built-in case in fixture order: positive, negative, UI
pub fn builtin_cases() -> Vec<TestCase> {
    POSITIVE
        .iter()
        .chain(NEGATIVE)
        .chain(UI)
        .map(Entry::to_case)
        .collect()
}

/// Case counts per kind, used for the coverage sheet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub positive: usize,
    pub negative: usize,
    pub ui: usize,
    pub unrecognised: usize,
}

impl Coverage {
    pub fn of(cases: &[TestCase]) -> Self {
        cases.iter().fold(Self::default(), |mut acc, case| {
            match case.kind() {
                CaseKind::Functional(Polarity::Positive) => acc.positive += 1,
                CaseKind::Functional(Polarity::Negative) => acc.negative += 1,
                CaseKind::RealTimeUpdate | CaseKind::ClearInput => acc.ui += 1,
                CaseKind::Unrecognised => acc.unrecognised += 1,
            }
            acc
        })
    }
}
