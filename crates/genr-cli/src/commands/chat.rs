use anyhow::Result;
use colored::Colorize;
use genr_application::{ChatReply, SessionGate};
use genr_core::gateway::{ChatRole, ChatTurn};

use super::utils::studio;

pub async fn run(gate: &SessionGate, message: Option<&str>, history: bool) -> Result<()> {
    let chat = &studio(gate)?.chat;

    let Some(message) = message.filter(|_| !history) else {
        let turns = chat.history().await;
        if turns.is_empty() {
            println!("{} {}", "Mr. GenR:".bright_magenta(), chat.greeting());
        }
        for turn in &turns {
            print_turn(turn);
        }
        return Ok(());
    };

    match chat.send_message(message).await? {
        ChatReply::Ignored => println!("{}", "Pesan kosong diabaikan.".bright_black()),
        ChatReply::Answer(text) => println!("{} {}", "Mr. GenR:".bright_magenta(), text),
        ChatReply::Failed(text) => println!("{} {}", "Mr. GenR:".bright_magenta(), text.red()),
    }
    Ok(())
}

fn print_turn(turn: &ChatTurn) {
    match turn.role {
        ChatRole::User => println!("{} {}", "Anda:".bright_blue(), turn.text),
        ChatRole::Model => println!("{} {}", "Mr. GenR:".bright_magenta(), turn.text),
    }
}
