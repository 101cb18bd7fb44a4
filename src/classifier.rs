//! Question Classifier
//!
//! Maps a raw question to a task type using an ordered rule table:
//! - FuturePrediction: forecasting vocabulary or a future year ("predict", "by 2030")
//! - Planning: PDDL-style plan prompts ("[PLAN]" + "my plan is as follows")
//! - Coding: code fences and unambiguous language names, or code vocabulary
//!   that doubles as plain English ("function", "swift") paired with a coding task
//! - Math: arithmetic vocabulary or expressions ("calculate", "x^2")
//! - Default: everything else
//!
//! The first rule that matches wins, so precedence is the table order.
//! A rule is a list of any-of groups that must all match.

use crate::models::TaskType;
use lazy_static::lazy_static;
use regex::Regex;

/// A single test against the lower-cased question
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Substring anywhere in the text
    Phrase(&'static str),
    /// Whole token (tokens split on anything but alphanumerics, `+` and `#`)
    Word(&'static str),
    /// Four-digit year from 2025 on
    FutureYear,
    /// `3 + 4`, `10/2`, `x^2`; dates and year ranges do not count
    ArithmeticExpression,
}

/// Any-of set of matchers
pub type MatcherGroup = &'static [Matcher];

/// A rule applies when every group has at least one matching matcher
#[derive(Debug)]
pub struct Rule {
    pub task_type: TaskType,
    pub all_of: &'static [MatcherGroup],
}

use Matcher::{Phrase, Word};

const PREDICTION_MATCHERS: MatcherGroup = &[
    Word("predict"),
    Word("prediction"),
    Word("predictions"),
    Word("forecast"),
    Word("forecasting"),
    Word("future"),
    Word("trend"),
    Word("trends"),
    Word("outlook"),
    Word("projection"),
    Word("projected"),
    Phrase("will happen"),
    Phrase("next year"),
    Phrase("in the coming"),
    Phrase("\\boxed"),
    Matcher::FutureYear,
];

const PLAN_HEADER: MatcherGroup = &[Phrase("[plan]")];
const PLAN_LEAD_IN: MatcherGroup = &[Phrase("my plan is as follows")];

/// Enough on their own
const CODE_SIGNALS: MatcherGroup = &[
    Phrase("```"),
    Phrase("def task_func"),
    Phrase("from datetime import"),
    Phrase("def "),
    Word("python"),
    Word("javascript"),
    Word("typescript"),
    Word("golang"),
    Word("c++"),
    Word("c#"),
    Word("haskell"),
    Word("kotlin"),
    Word("sql"),
    Word("regex"),
    Word("algorithm"),
];

/// Also ordinary English ("function of the liver", "Taylor Swift")
const CODE_VOCABULARY: MatcherGroup = &[
    Word("code"),
    Word("function"),
    Word("program"),
    Word("script"),
    Word("class"),
    Word("method"),
    Word("api"),
    Word("import"),
    Word("rust"),
    Word("java"),
    Word("ruby"),
    Word("bash"),
    Word("swift"),
];

/// Pairs with `CODE_VOCABULARY`
const CODE_TASK: MatcherGroup = &[
    Word("write"),
    Word("implement"),
    Word("refactor"),
    Word("debug"),
    Word("fix"),
    Word("compile"),
    Word("returns"),
    Word("snippet"),
    Phrase("()"),
    Phrase("{"),
    Phrase("=>"),
    Phrase("->"),
];

const MATH_MATCHERS: MatcherGroup = &[
    Word("calculate"),
    Word("compute"),
    Word("solve"),
    Word("integral"),
    Word("integrate"),
    Word("derivative"),
    Word("differentiate"),
    Word("equation"),
    Word("equations"),
    Word("plus"),
    Word("minus"),
    Word("multiply"),
    Word("multiplied"),
    Word("divide"),
    Word("divided"),
    Word("percent"),
    Word("percentage"),
    Word("probability"),
    Word("sqrt"),
    Word("factorial"),
    Word("fraction"),
    Word("average"),
    Phrase("sum of"),
    Phrase("product of"),
    Phrase("square root"),
    Phrase("prime number"),
    Phrase("how many"),
    Matcher::ArithmeticExpression,
];

/// Evaluated top-down; `Default` applies when nothing matches
pub const RULES: &[Rule] = &[
    Rule {
        task_type: TaskType::FuturePrediction,
        all_of: &[PREDICTION_MATCHERS],
    },
    Rule {
        task_type: TaskType::Planning,
        all_of: &[PLAN_HEADER, PLAN_LEAD_IN],
    },
    Rule {
        task_type: TaskType::Coding,
        all_of: &[CODE_SIGNALS],
    },
    Rule {
        task_type: TaskType::Coding,
        all_of: &[CODE_VOCABULARY, CODE_TASK],
    },
    Rule {
        task_type: TaskType::Math,
        all_of: &[MATH_MATCHERS],
    },
];

lazy_static! {
    static ref FUTURE_YEAR: Regex =
        Regex::new(r"\b20(2[5-9]|[3-9][0-9])\b").expect("future year pattern is valid");
    static ref DATE_LIKE: Regex = Regex::new(
        r"\b[0-9]{4}\s*-\s*[0-9]{4}\b|\b[0-9]{1,4}[-/.][0-9]{1,2}[-/.][0-9]{1,4}\b"
    )
    .expect("date pattern is valid");
    static ref ARITHMETIC: Regex = Regex::new(r"[0-9]\s*[-+*/^]\s*[0-9]|[a-z]\s*\^\s*[0-9]")
        .expect("arithmetic pattern is valid");
}

/// Lower-cased question plus its token list, computed once per question
struct Normalized {
    text: String,
    tokens: Vec<String>,
}

impl Normalized {
    fn new(question: &str) -> Self {
        let text = question.to_lowercase();
        let tokens = text
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, tokens }
    }

    fn matches(&self, matcher: &Matcher) -> bool {
        match matcher {
            Matcher::Phrase(p) => self.text.contains(*p),
            Matcher::Word(w) => self.tokens.iter().any(|t| t == w),
            Matcher::FutureYear => FUTURE_YEAR.is_match(&self.text),
            Matcher::ArithmeticExpression => {
                ARITHMETIC.is_match(&DATE_LIKE.replace_all(&self.text, " "))
            }
        }
    }
}

impl Rule {
    fn applies(&self, question: &Normalized) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|m| question.matches(m)))
    }
}

/// Question classifier
pub struct QuestionClassifier;

impl QuestionClassifier {
    /// Classify a question into a task type
    pub fn classify(question: &str) -> TaskType {
        Self::classify_with(RULES, question)
    }

    /// Classify against an explicit rule table
    pub fn classify_with(rules: &[Rule], question: &str) -> TaskType {
        let normalized = Normalized::new(question);

        rules
            .iter()
            .find(|rule| rule.applies(&normalized))
            .map(|rule| rule.task_type)
            .unwrap_or(TaskType::Default)
    }
}
