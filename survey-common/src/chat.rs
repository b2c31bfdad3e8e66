//! Scripted survey assistant
//!
//! Walks a respondent through the form one field at a time:
//! name → age → user type → rating → feedback → submit.
//! Free text outside the script is answered by keyword (help on each
//! field, a sentiment explanation, a submit shortcut).
//!
//! The script is pure state; submitting the draft and looking up sentiment
//! are left to the caller, which reports the lookup outcome back through
//! [`ChatScript::sentiment_reply`].

use serde::Serialize;

use crate::db::UserType;
use crate::sentiment::SentimentLabel;
use crate::validation::ResponseDraft;
use crate::{Error, Result};

pub const GREETING: &str = "Hello! I’m here to help with the survey. Type \"start\" to begin.";
pub const SUBMIT_PROMPT: &str = "Ready to submit? Click the button below.";
pub const SUBMIT_BUTTON: &str = "Submit Feedback";
pub const SUBMITTED: &str = "Feedback submitted! Thanks for your input.";
pub const SENTIMENT_ERROR: &str = "Error analyzing sentiment.";

const RATING_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Where the respondent is in the script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Step {
    Idle,
    Name,
    Age,
    UserType,
    Rating,
    Feedback,
    ReadyToSubmit,
    Submitted,
}

/// Control the bot is currently offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Input { placeholder: String },
    Select { options: Vec<String> },
    Button { text: String },
}

impl Action {
    fn input(placeholder: &str) -> Self {
        Action::Input {
            placeholder: placeholder.to_string(),
        }
    }

    fn select(options: &[&str]) -> Self {
        Action::Select {
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn submit_button() -> Self {
        Action::Button {
            text: SUBMIT_BUTTON.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// What the bot says in reply to one user event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotTurn {
    pub messages: Vec<String>,
    /// Newly offered control, if this turn replaced it
    pub action: Option<Action>,
    /// The caller should analyze the current feedback and report back
    pub needs_sentiment_lookup: bool,
}

#[derive(Debug, Clone)]
pub struct ChatScript {
    draft: ResponseDraft,
    step: Step,
    pending: Option<Action>,
    transcript: Vec<ChatMessage>,
}

impl Default for ChatScript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatScript {
    /// New conversation, already greeted
    pub fn new() -> Self {
        let mut script = Self {
            draft: ResponseDraft::default(),
            step: Step::Idle,
            pending: None,
            transcript: Vec::new(),
        };
        script.bot(GREETING);
        script
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ResponseDraft {
        &self.draft
    }

    pub fn pending_action(&self) -> Option<&Action> {
        self.pending.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Route a free-text message by keyword
    pub fn handle_message(&mut self, text: &str) -> BotTurn {
        self.transcript.push(ChatMessage {
            sender: Sender::User,
            text: text.to_string(),
        });

        let lower = text.to_lowercase();
        let has = |word: &str| lower.contains(word);
        let mut turn = BotTurn::default();

        if has("start") || has("begin") {
            self.step = Step::Name;
            self.say(&mut turn, "Great! Let’s start. What’s your name?");
            self.offer(&mut turn, Action::input("Enter your name"));
        } else if has("name") {
            self.say(
                &mut turn,
                "Your name helps us personalize the feedback. It should be at least 2 characters long.",
            );
        } else if has("age") {
            self.say(
                &mut turn,
                "We need your age to understand our audience better. Enter a number between 1 and 120.",
            );
        } else if has("rating") || has("how rate") {
            self.say(&mut turn, "Rating is from 1 to 5 stars. 1 is poor, 5 is excellent.");
        } else if has("feedback") {
            self.say(
                &mut turn,
                "Your feedback helps us improve. Be specific for better sentiment analysis!",
            );
        } else if has("sentiment") {
            self.say(
                &mut turn,
                "Sentiment analysis uses AI to determine if your feedback is positive, neutral, or negative.",
            );
            turn.needs_sentiment_lookup = !self.draft.feedback.is_empty();
        } else if has("submit") || has("done") {
            self.step = Step::ReadyToSubmit;
            self.say(&mut turn, SUBMIT_PROMPT);
            self.offer(&mut turn, Action::submit_button());
        } else if has("bye") || has("thanks") {
            self.say(&mut turn, "Thanks for using the survey! Bye!");
        } else {
            self.say(
                &mut turn,
                "I’m not sure what you mean. Try saying \"start\", \"submit\", or ask about \"name\", \"age\", \"rating\", \"feedback\", or \"sentiment\".",
            );
        }

        turn
    }

    /// Answer the pending input or select control and advance the script
    pub fn answer(&mut self, value: &str) -> Result<BotTurn> {
        match &self.pending {
            Some(Action::Input { .. }) | Some(Action::Select { .. }) => {}
            Some(Action::Button { .. }) => {
                return Err(Error::InvalidInput(
                    "The submit button is waiting; use submit".to_string(),
                ))
            }
            None => {
                return Err(Error::InvalidInput(
                    "No question is waiting for an answer".to_string(),
                ))
            }
        }

        let mut turn = BotTurn::default();
        match self.step {
            Step::Name => {
                self.record(value);
                self.draft.name = value.to_string();
                self.step = Step::Age;
                self.say(&mut turn, &format!("Thanks, {}! Now, what’s your age?", value));
                self.offer(&mut turn, Action::input("Enter your age"));
            }
            Step::Age => {
                self.record(value);
                self.draft.age = value.to_string();
                self.step = Step::UserType;
                self.say(
                    &mut turn,
                    "Got it! What type of user are you? (Student, Professional, Other)",
                );
                let options: Vec<&str> = UserType::ALL.iter().map(|t| t.as_str()).collect();
                self.offer(&mut turn, Action::select(&options));
            }
            Step::UserType => {
                // Stored as given; the form validator reports unknown types
                self.record(value);
                self.draft.user_type = value.to_string();
                self.step = Step::Rating;
                self.say(&mut turn, "Nice! Please provide a rating (1-5 stars).");
                self.offer(&mut turn, Action::select(&RATING_OPTIONS));
            }
            Step::Rating => {
                let rating = value
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|r| (1..=5).contains(r))
                    .ok_or_else(|| {
                        Error::InvalidInput(format!("'{}' is not a rating from 1 to 5", value))
                    })?;
                self.record(value);
                self.draft.rating = rating;
                self.step = Step::Feedback;
                self.say(&mut turn, "Thanks! Now, share your feedback.");
                self.offer(&mut turn, Action::input("Enter your feedback"));
            }
            Step::Feedback => {
                self.record(value);
                self.draft.feedback = value.to_string();
                self.step = Step::ReadyToSubmit;
                self.say(&mut turn, SUBMIT_PROMPT);
                self.offer(&mut turn, Action::submit_button());
            }
            Step::Idle | Step::ReadyToSubmit | Step::Submitted => {
                return Err(Error::Internal(format!(
                    "Pending question in step {:?}",
                    self.step
                )))
            }
        }

        Ok(turn)
    }

    /// Press the submit button. Returns the draft for the caller to send;
    /// report the outcome with [`ChatScript::confirm_submitted`] or
    /// [`ChatScript::submission_failed`].
    pub fn submit(&mut self) -> Result<ResponseDraft> {
        if !matches!(self.pending, Some(Action::Button { .. })) {
            return Err(Error::InvalidInput(
                "Submit is not available yet; say \"submit\" first".to_string(),
            ));
        }

        self.pending = None;
        Ok(self.draft.clone())
    }

    /// The server stored the draft
    pub fn confirm_submitted(&mut self) -> &'static str {
        self.step = Step::Submitted;
        self.bot(SUBMITTED);
        SUBMITTED
    }

    /// The server rejected the draft; the button is offered again
    pub fn submission_failed(&mut self, reason: &str) -> BotTurn {
        let mut turn = BotTurn::default();
        self.say(&mut turn, reason);
        self.offer(&mut turn, Action::submit_button());
        turn
    }

    /// Report the outcome of a sentiment lookup requested by a turn
    pub fn sentiment_reply(&mut self, result: std::result::Result<(SentimentLabel, f64), String>) -> String {
        let text = match result {
            Ok((label, polarity)) => format!(
                "Your current feedback sentiment is {} (Polarity: {:.2})",
                label, polarity
            ),
            Err(_) => SENTIMENT_ERROR.to_string(),
        };
        self.bot(&text);
        text
    }

    fn say(&mut self, turn: &mut BotTurn, text: &str) {
        self.bot(text);
        turn.messages.push(text.to_string());
    }

    fn offer(&mut self, turn: &mut BotTurn, action: Action) {
        self.pending = Some(action.clone());
        turn.action = Some(action);
    }

    fn bot(&mut self, text: &str) {
        self.transcript.push(ChatMessage {
            sender: Sender::Bot,
            text: text.to_string(),
        });
    }

    fn record(&mut self, value: &str) {
        self.transcript.push(ChatMessage {
            sender: Sender::User,
            text: value.to_string(),
        });
    }
}
