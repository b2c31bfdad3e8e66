//! Terminal survey assistant
//!
//! Plays the scripted survey conversation against a running survey-server.
//!
//! **Usage:**
//! ```bash
//! survey-chat [--server http://localhost:8000]
//! ```
//!
//! While the bot is waiting for a field, each line answers it. Prefix a
//! line with `/` to chat instead (e.g. `/sentiment`).

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use survey_common::chat::{Action, BotTurn, ChatScript};
use survey_common::validation::ResponseDraft;
use survey_common::SentimentLabel;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Terminal front-end for the survey assistant
#[derive(Parser, Debug)]
#[clap(name = "survey-chat")]
#[clap(about = "Fill in the feedback survey from the terminal")]
struct Args {
    /// Base URL of survey-server
    #[clap(long, default_value = "http://localhost:8000", env = "SURVEY_SERVER_URL")]
    server: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeReply {
    sentiment: SentimentLabel,
    polarity: f64,
}

#[derive(Debug, Deserialize)]
struct SubmitReply {
    sentiment: f64,
}

struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    async fn analyze(&self, feedback: &str) -> Result<(SentimentLabel, f64)> {
        let reply: AnalyzeReply = self
            .http
            .post(format!("{}/analyze", self.base))
            .json(&json!({ "feedback": feedback }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok((reply.sentiment, reply.polarity))
    }

    async fn submit(&self, draft: &ResponseDraft) -> Result<f64> {
        let response = self
            .http
            .post(format!("{}/submit-response", self.base))
            .json(&json!({
                "name": draft.name,
                "age": draft.age,
                "feedback": draft.feedback,
                "rating": draft.rating,
                "userType": draft.user_type,
            }))
            .send()
            .await
            .context("Server unreachable")?;

        if !response.status().is_success() {
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("Submission failed");
            anyhow::bail!("{} ({})", message, status);
        }

        let reply: SubmitReply = response.json().await?;
        Ok(reply.sentiment)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_chat=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = Client::new(&args.server);
    let mut script = ChatScript::new();

    bot_say(script.greeting());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(text) = line.strip_prefix('/') {
            chat(&mut script, &client, text).await;
            continue;
        }

        let pending = script.pending_action().cloned();
        match pending {
            Some(Action::Input { .. }) | Some(Action::Select { .. }) => match script.answer(line) {
                Ok(turn) => show_turn(&turn),
                Err(e) => bot_say(&e.to_string()),
            },
            Some(Action::Button { .. }) if confirms(line) => submit(&mut script, &client).await,
            _ => chat(&mut script, &client, line).await,
        }
    }

    Ok(())
}

async fn chat(script: &mut ChatScript, client: &Client, text: &str) {
    let turn = script.handle_message(text);
    show_turn(&turn);

    if turn.needs_sentiment_lookup {
        let feedback = script.draft().feedback.clone();
        let result = client.analyze(&feedback).await.map_err(|e| {
            debug!("Sentiment lookup failed: {}", e);
            e.to_string()
        });
        bot_say(&script.sentiment_reply(result));
    }
}

async fn submit(script: &mut ChatScript, client: &Client) {
    let draft = match script.submit() {
        Ok(draft) => draft,
        Err(e) => {
            bot_say(&e.to_string());
            return;
        }
    };

    match client.submit(&draft).await {
        Ok(sentiment) => {
            bot_say(script.confirm_submitted());
            debug!(sentiment, "Response stored");
        }
        Err(e) => show_turn(&script.submission_failed(&e.to_string())),
    }
}

fn confirms(line: &str) -> bool {
    matches!(
        line.to_lowercase().as_str(),
        "y" | "yes" | "ok" | "submit" | "submit feedback"
    )
}

fn show_turn(turn: &BotTurn) {
    for message in &turn.messages {
        bot_say(message);
    }
    if let Some(action) = &turn.action {
        println!("     {}", describe(action));
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::Input { placeholder } => format!("({})", placeholder),
        Action::Select { options } => format!("[{}]", options.join(" / ")),
        Action::Button { text } => format!("<{}> type \"yes\" to submit", text),
    }
}

fn bot_say(text: &str) {
    println!("Bot: {}", text);
}

fn prompt() -> Result<()> {
    print!("You: ");
    std::io::stdout().flush().context("Failed to flush stdout")
}
