//! Interactive chat shell.
//!
//! Lines starting with `/` are commands; anything else is sent to the
//! conversation.

use std::io::Write;

use parley_client::{AuthClient, Conversation, SearchMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  /signup <email> <username> <password>   create an account
  /login <email> <password>               sign in
  /logout                                 forget the session token
  /whoami                                 show the signed-in user
  /mode local|global                      choose the search endpoint
  /history                                print the transcript
  /help                                   show this help
  /quit                                   leave
Anything else is sent as a chat message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Signup {
        email: String,
        username: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Mode(SearchMode),
    History,
    Help,
    Quit,
    /// A malformed command, with the message to show.
    Invalid(String),
    Message(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return ShellCommand::Message(line.trim_end_matches(['\r', '\n']).to_string());
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.as_slice() {
        ["/signup", email, username, password] => ShellCommand::Signup {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        },
        ["/signup", ..] => ShellCommand::Invalid("usage: /signup <email> <username> <password>".into()),
        ["/login", email, password] => ShellCommand::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["/login", ..] => ShellCommand::Invalid("usage: /login <email> <password>".into()),
        ["/logout"] => ShellCommand::Logout,
        ["/whoami"] => ShellCommand::WhoAmI,
        ["/mode", mode] => match mode.parse::<SearchMode>() {
            Ok(mode) => ShellCommand::Mode(mode),
            Err(e) => ShellCommand::Invalid(e),
        },
        ["/mode", ..] => ShellCommand::Invalid("usage: /mode local|global".into()),
        ["/history"] => ShellCommand::History,
        ["/help"] => ShellCommand::Help,
        ["/quit"] | ["/exit"] => ShellCommand::Quit,
        [other, ..] => ShellCommand::Invalid(format!("unknown command {other}, try /help")),
        [] => ShellCommand::Message(String::new()),
    }
}

pub async fn run(auth: &AuthClient, conversation: &mut Conversation) -> std::io::Result<()> {
    println!("Connected. Type /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match parse_line(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Invalid(msg) => println!("{msg}"),
            ShellCommand::Signup {
                email,
                username,
                password,
            } => println!("{}", auth.register(&email, &username, &password).await),
            ShellCommand::Login { email, password } => {
                println!("{}", auth.login(&email, &password).await)
            }
            ShellCommand::Logout => {
                if auth.logout().await {
                    println!("Signed out.");
                } else {
                    println!("Not signed in.");
                }
            }
            ShellCommand::WhoAmI => match auth.current_user().await {
                Ok(profile) => match profile.email {
                    Some(email) => println!("{} <{email}>", profile.username),
                    None => println!("{}", profile.username),
                },
                Err(e) => println!("{e}"),
            },
            ShellCommand::Mode(mode) => {
                conversation.set_mode(mode);
                println!("Search mode: {}", mode.as_str());
            }
            ShellCommand::History => {
                for message in conversation.messages().await {
                    println!("{}> {}", message.sender, message.text);
                }
            }
            ShellCommand::Message(text) => {
                conversation.set_draft(text).await;
                if let Some(reply) = conversation.submit_draft().await {
                    println!("agent> {}", reply.text);
                }
            }
        }
    }

    debug!(messages = conversation.message_count().await, "shell closed");
    Ok(())
}
