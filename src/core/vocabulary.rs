// src/core/vocabulary.rs
//! Declarative vocabulary tables for posting analysis and achievement scoring.
//!
//! Every table is plain data; `VOCABULARY` compiles them once into case-insensitive
//! word-bounded regexes. Scoring code only ever goes through the compiled form.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::types::Segment;

// ===== Raw Tables =====

/// Canonical name and the pattern that recognizes it.
pub type TermTable = &'static [(&'static str, &'static str)];

pub struct SegmentTable {
    pub segment: Segment,
    /// Recorded verbatim as segment signals; earlier alternatives win on overlap.
    pub terms: &'static [&'static str],
    pub high_value: &'static [&'static str],
    pub medium_value: &'static [&'static str],
    /// Flat bonus vocabulary when scoring achievements for this segment.
    pub achievement_terms: &'static [&'static str],
    /// Role keywords preferred when rewriting titles for this segment.
    pub title_words: &'static [&'static str],
}

pub const SKILLS: TermTable = &[
    ("Salesforce", r"salesforce|sfdc"),
    ("HubSpot", r"hubspot"),
    ("Excel", r"excel|spreadsheets?"),
    ("SQL", r"sql"),
    ("Python", r"python"),
    ("JavaScript", r"javascript"),
    ("JSON", r"json"),
    ("APIs", r"apis?|rest(?:ful)?\s+apis?"),
    ("Tableau", r"tableau"),
    ("Power BI", r"power\s?bi"),
    ("Looker", r"looker"),
    ("Google Analytics", r"google analytics|ga4"),
    ("Zapier", r"zapier"),
    ("Make.com", r"make\.com"),
    ("NetSuite", r"netsuite"),
    ("Workday", r"workday"),
    ("ADP", r"adp"),
    ("Jira", r"jira"),
    ("Asana", r"asana"),
    ("Airtable", r"airtable"),
    ("Snowflake", r"snowflake"),
    ("dbt", r"dbt"),
    ("Marketo", r"marketo"),
    ("Gong", r"gong"),
    ("LLM Tools", r"chatgpt|openai|llms?|prompt engineering"),
];

pub const PARTNERS: TermTable = &[
    ("Product", r"product"),
    ("Engineering", r"engineering|engineers?"),
    ("Finance", r"finance"),
    ("Sales", r"sales"),
    ("Marketing", r"marketing"),
    ("Customer Success", r"customer success"),
    ("Support", r"support"),
    ("Legal", r"legal"),
    ("HR", r"hr|human resources|people team"),
    ("Executive Leadership", r"executives?|leadership|c-suite"),
];

pub const METRICS: TermTable = &[
    ("Revenue Growth", r"revenue growth|grow revenue"),
    ("Retention", r"retention"),
    ("Churn", r"churn"),
    ("NPS", r"nps|net promoter"),
    ("CSAT", r"csat|customer satisfaction"),
    ("Cost Reduction", r"cost (?:reduction|savings)|reduce costs?"),
    ("Efficiency", r"efficiency"),
    ("Accuracy", r"accuracy"),
    ("Time to Value", r"time[- ]to[- ]value"),
    ("Conversion", r"conversion(?: rates?)?"),
    ("ARR", r"arr"),
    ("Participation", r"participation|enrollment rates?"),
];

pub const PLATFORM_NOUNS: TermTable = &[
    ("Platform", r"platforms?"),
    ("CRM", r"crm"),
    ("ERP", r"erp"),
    ("HRIS", r"hris"),
    ("Dashboard", r"dashboards?"),
    ("Data Warehouse", r"data warehouse"),
    ("Portal", r"portals?"),
    ("Chatbot", r"chatbots?"),
    ("Knowledge Base", r"knowledge base"),
];

pub const SEGMENTS: &[SegmentTable] = &[
    SegmentTable {
        segment: Segment::Benefits,
        terms: &[
            r"employee benefits",
            r"benefits administration",
            r"benefits",
            r"enrollment",
            r"carriers?",
            r"brokers?",
            r"insurance",
            r"payroll",
            r"hris",
            r"peo",
            r"cobra",
            r"health plans?",
            r"healthcare",
        ],
        high_value: &[r"enrollment", r"carriers?", r"brokers?", r"benefits administration"],
        medium_value: &[r"insurance", r"payroll", r"hris", r"health plans?", r"peo"],
        achievement_terms: &[
            r"employees?",
            r"benefits?",
            r"enrollment",
            r"carriers?",
            r"brokers?",
            r"insurance",
            r"claims",
            r"members?",
            r"compliance",
        ],
        title_words: &["Benefits", "Enrollment", "Compliance"],
    },
    SegmentTable {
        segment: Segment::Saas,
        terms: &[
            r"software as a service",
            r"saas",
            r"subscriptions?",
            r"arr",
            r"mrr",
            r"churn",
            r"retention",
            r"onboarding",
            r"customer success",
            r"product-led",
            r"integrations?",
            r"renewals?",
            r"multi-tenant",
        ],
        high_value: &[r"saas", r"arr", r"churn", r"customer success"],
        medium_value: &[r"subscriptions?", r"onboarding", r"renewals?", r"retention"],
        achievement_terms: &[
            r"customers?",
            r"onboarding",
            r"retention",
            r"churn",
            r"subscriptions?",
            r"platform",
            r"adoption",
            r"renewals?",
        ],
        title_words: &["SaaS", "Customer Success", "Onboarding", "Implementation"],
    },
    SegmentTable {
        segment: Segment::Revenue,
        terms: &[
            r"revenue operations",
            r"revops",
            r"revenue",
            r"sales",
            r"pipeline",
            r"quotas?",
            r"bookings",
            r"forecast(?:ing|s)?",
            r"go-to-market",
            r"gtm",
            r"deal desk",
            r"upsell",
            r"cross-sell",
            r"crm",
        ],
        high_value: &[r"revenue operations", r"revops", r"pipeline", r"forecast(?:ing|s)?"],
        medium_value: &[r"quotas?", r"bookings", r"go-to-market", r"gtm", r"deal desk"],
        achievement_terms: &[
            r"revenue",
            r"sales",
            r"pipeline",
            r"deals?",
            r"quotas?",
            r"bookings",
            r"conversion",
            r"upsell",
        ],
        title_words: &["Revenue Operations", "RevOps", "Revenue", "Sales", "Pipeline"],
    },
    SegmentTable {
        segment: Segment::Operations,
        terms: &[
            r"operations",
            r"process improvement",
            r"processes",
            r"process",
            r"workflows?",
            r"automation",
            r"efficiency",
            r"sops?",
            r"cross-functional",
            r"implementation",
            r"project management",
            r"scalable",
        ],
        high_value: &[r"process improvement", r"automation", r"workflows?"],
        medium_value: &[r"efficiency", r"sops?", r"implementation", r"project management"],
        achievement_terms: &[
            r"process(?:es)?",
            r"workflows?",
            r"automat\w*",
            r"efficiency",
            r"streamlin\w*",
            r"sops?",
            r"operations",
        ],
        title_words: &["Operations", "Automation", "Process", "Implementation"],
    },
];

/// Segment terms that may become role keywords.
pub const ROLE_WORDS: &[&str] = &[
    "benefits",
    "enrollment",
    "compliance",
    "saas",
    "customer success",
    "onboarding",
    "implementation",
    "revenue operations",
    "revops",
    "revenue",
    "sales",
    "pipeline",
    "operations",
    "automation",
    "process",
];

/// Spellings that plain title-casing would get wrong.
const DISPLAY_CASE: &[(&str, &str)] = &[
    ("saas", "SaaS"),
    ("revops", "RevOps"),
    ("gtm", "GTM"),
    ("hr", "HR"),
    ("hris", "HRIS"),
    ("crm", "CRM"),
    ("ai", "AI"),
];

const LEADERSHIP: &[&str] = &[r"led", r"managed", r"orchestrated", r"spearheaded", r"architected"];

const TRANSFORMATION: &[&str] = &[
    r"automat\w*",
    r"ai",
    r"artificial intelligence",
    r"machine learning",
    r"analytics",
    r"optimi[sz]\w*",
    r"dashboards?",
];

/// Percentages, currency amounts, `N+` counts, `12K`-style magnitudes and
/// change verbs followed by a number.
const QUANTIFIED: &str = r"(?i)\d+(?:\.\d+)?\s?%|\$\s?\d[\d,]*(?:\.\d+)?|\b\d+\+|\b\d+(?:\.\d+)?[KMB]\b|\b(?:increased|grew|reduced|decreased|boosted|cut|improved|saved|generated|raised)\b[^.;]*?\d";

/// Generic qualifier + role noun, e.g. "Business Analyst", "Project Manager".
const TITLE_FRAGMENT: &str = r"(?i)\b(business|project|program|process|general|operations)(\s+)(manager|analyst|lead|specialist|consultant|coordinator|director|associate)\b";

// ===== Compiled Form =====

pub struct CompiledTerm {
    pub name: &'static str,
    pub regex: Regex,
}

pub struct CompiledSegment {
    pub segment: Segment,
    pub terms: Regex,
    pub high_value: Regex,
    pub medium_value: Regex,
    pub achievement_terms: Regex,
    pub title_words: &'static [&'static str],
}

pub struct Vocabulary {
    pub skills: Vec<CompiledTerm>,
    pub partners: Vec<CompiledTerm>,
    pub metrics: Vec<CompiledTerm>,
    pub platform_nouns: Vec<CompiledTerm>,
    pub segments: Vec<CompiledSegment>,
    pub tools: Regex,
    pub leadership: Regex,
    pub transformation: Regex,
    pub quantified: Regex,
    pub title_fragment: Regex,
}

pub static VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::compile);

fn alternation(patterns: &[&str]) -> Regex {
    let source = format!(r"(?i)\b(?:{})\b", patterns.join("|"));
    Regex::new(&source).expect("vocabulary pattern")
}

fn compile_table(table: TermTable) -> Vec<CompiledTerm> {
    table
        .iter()
        .map(|&(name, pattern)| CompiledTerm {
            name,
            regex: alternation(&[pattern]),
        })
        .collect()
}

impl Vocabulary {
    fn compile() -> Self {
        let tool_patterns: Vec<&str> = SKILLS.iter().map(|(_, pattern)| *pattern).collect();

        Self {
            skills: compile_table(SKILLS),
            partners: compile_table(PARTNERS),
            metrics: compile_table(METRICS),
            platform_nouns: compile_table(PLATFORM_NOUNS),
            segments: SEGMENTS
                .iter()
                .map(|table| CompiledSegment {
                    segment: table.segment,
                    terms: alternation(table.terms),
                    high_value: alternation(table.high_value),
                    medium_value: alternation(table.medium_value),
                    achievement_terms: alternation(table.achievement_terms),
                    title_words: table.title_words,
                })
                .collect(),
            tools: alternation(&tool_patterns),
            leadership: alternation(LEADERSHIP),
            transformation: alternation(TRANSFORMATION),
            quantified: Regex::new(QUANTIFIED).expect("quantified pattern"),
            title_fragment: Regex::new(TITLE_FRAGMENT).expect("title fragment pattern"),
        }
    }

    pub fn segment(&self, segment: Segment) -> &CompiledSegment {
        self.segments
            .iter()
            .find(|compiled| compiled.segment == segment)
            .expect("every segment has a vocabulary table")
    }
}

// ===== Matching Helpers =====

/// Canonical names of every table entry found in `text`, in table order.
pub fn matched_names<'a>(table: &'a [CompiledTerm], text: &str) -> Vec<&'a str> {
    table
        .iter()
        .filter(|term| term.regex.is_match(text))
        .map(|term| term.name)
        .collect()
}

/// `weight` for every entry of `table` named in `names` whose pattern recognizes
/// `text`. Profiles store canonical names ("Excel"), while resumes use whatever
/// spelling the pattern accepts ("spreadsheets").
pub fn term_score<'a, I>(table: &[CompiledTerm], names: I, text: &str, weight: i32) -> i32
where
    I: IntoIterator<Item = &'a str>,
{
    let names: BTreeSet<&str> = names.into_iter().collect();
    table
        .iter()
        .filter(|term| names.contains(term.name) && term.regex.is_match(text))
        .count() as i32
        * weight
}

/// Score-by-vocabulary-overlap: `weight` for every distinct term that appears in
/// `text` as a case-insensitive substring.
pub fn overlap_score<'a, I>(text: &str, terms: I, weight: i32) -> i32
where
    I: IntoIterator<Item = &'a str>,
{
    let haystack = text.to_lowercase();
    let mut seen = BTreeSet::new();
    terms
        .into_iter()
        .map(str::to_lowercase)
        .filter(|term| !term.is_empty() && seen.insert(term.clone()))
        .filter(|term| haystack.contains(term.as_str()))
        .count() as i32
        * weight
}

/// Title-case a matched term, honoring acronym spellings.
pub fn display_case(term: &str) -> String {
    let lower = term.to_lowercase();
    if let Some((_, display)) = DISPLAY_CASE.iter().find(|(key, _)| *key == lower) {
        return display.to_string();
    }

    lower
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_role_word(term: &str) -> bool {
    let lower = term.to_lowercase();
    ROLE_WORDS.contains(&lower.as_str())
}
