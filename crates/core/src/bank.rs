//! The fixed set of questions a quiz draws from.

use crate::model::{DataIntegrityError, Question, QuestionRecord};

/// Read-only, validated collection of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from raw records, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the first `DataIntegrityError` found, labelled with the record's index.
    pub fn new(records: impl IntoIterator<Item = QuestionRecord>) -> Result<Self, DataIntegrityError> {
        let questions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Question::from_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { questions })
    }

    /// Load a bank from a JSON array of `{question, answer, distractors}` objects.
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrityError::Malformed` if the document does not parse,
    /// or the validation error of the first invalid record.
    pub fn from_json_str(raw: &str) -> Result<Self, DataIntegrityError> {
        let records: Vec<QuestionRecord> = serde_json::from_str(raw)
            .map_err(|err| DataIntegrityError::Malformed(err.to_string()))?;
        Self::new(records)
    }

    /// The stock question set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

fn record(question: &str, answer: &str, distractors: &[&str]) -> QuestionRecord {
    QuestionRecord {
        question: question.to_owned(),
        answer: answer.to_owned(),
        distractors: distractors.iter().map(|d| (*d).to_owned()).collect(),
    }
}

fn builtin_records() -> Vec<QuestionRecord> {
    vec![
        record(
            "What does <code>typeof typeof 1</code> evaluate to?",
            "<code>&quot;string&quot;</code>",
            &[
                "<code>&quot;number&quot;</code>",
                "<code>&quot;object&quot;</code>",
                "Nothing; it causes an error.",
            ],
        ),
        record(
            "Which of the following is <em>NOT</em> a valid way to increment the variable <code>x</code>?",
            "<code>Math.increaseBy1(x);</code>",
            &[
                "<code>x += 1;</code>",
                "<code>x = x + 1;</code>",
                "<code>x += 1;</code>",
                "<code>++x;</code>",
                "<code>x++;</code>",
            ],
        ),
        record(
            "How do you output a value to the browser console?",
            "<code>console.log(<em>expression</em>)</code>",
            &[
                "<code>print(<em>expression</em>)</code>",
                "<code>window.alert(<em>expression</em>)</code>",
                "<code>window.log(<em>expression</em>)</code>",
            ],
        ),
        record(
            "What keyword declares a variable whose value cannot be changed through reassignment?",
            "<code>const</code>",
            &["<code>let</code>", "<code>var</code>", "<code>frozen</code>"],
        ),
        record(
            "How many days did it take Brendan Eich to create Javascript in 1995?",
            "10",
            &["1", "5", "100", "20"],
        ),
        record(
            "What symbol or keyword is used as the assignment operator in Javascript?",
            "<code>=</code>",
            &[
                "<code>:=</code>",
                "<code>==</code>",
                "<code>===</code>",
                "<code>&lt;-</code>",
            ],
        ),
        record(
            "What does the function <code>setTimeout</code> do?",
            "Invokes a callback function after a given number of milliseconds have elapsed.",
            &[
                "Unloads the webpage after a given number of milliseconds have elapsed.",
                "Halts the execution of JavaScript code after a given number of milliseconds have elapsed.",
                "Pauses execution of all JavaScript code for a given number of milliseconds.",
            ],
        ),
    ]
}

// Validity of the stock records is asserted by `builtin_questions_are_valid`.
fn builtin_questions() -> Vec<Question> {
    builtin_records()
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let result = Question::from_record(index, record);
            debug_assert!(result.is_ok(), "invalid builtin question #{index}");
            result.ok()
        })
        .collect()
}
