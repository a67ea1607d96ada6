use std::env;
use std::process::ExitCode;

use log::{debug, error};
use tokio::io::AsyncReadExt;
use whisk::{parse_completion, Provider, RecipeDraft, RecipeGenerator, WhiskError};

const USAGE: &str = "Usage: whisk [--count N] [--provider openai|anthropic|ollama] <meal description...>
       whisk --parse-stdin < completion.txt";

enum Command {
    Generate {
        description: String,
        count: usize,
        provider: Option<Provider>,
    },
    ParseStdin,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut words = Vec::new();
    let mut count = 1;
    let mut provider = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--parse-stdin" => return Ok(Command::ParseStdin),
            "--count" => {
                let value = iter.next().ok_or("--count needs a value")?;
                count = value
                    .parse()
                    .map_err(|_| format!("Invalid count: {}", value))?;
            }
            "--provider" => {
                let value = iter.next().ok_or("--provider needs a value")?;
                provider = Some(value.parse::<Provider>()?);
            }
            word => words.push(word.to_string()),
        }
    }

    if words.is_empty() {
        return Err(USAGE.to_string());
    }

    Ok(Command::Generate {
        description: words.join(" "),
        count,
        provider,
    })
}

async fn run(command: Command) -> Result<Vec<RecipeDraft>, WhiskError> {
    match command {
        Command::ParseStdin => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| WhiskError::InvalidInput(e.to_string()))?;
            debug!("Read {} bytes from stdin", raw.len());
            Ok(parse_completion(&raw)?.into_drafts())
        }
        Command::Generate {
            description,
            count,
            provider,
        } => {
            let mut builder = RecipeGenerator::builder()
                .description(description)
                .count(count);
            if let Some(provider) = provider {
                builder = builder.provider(provider);
            }
            Ok(builder.build().await?.into_drafts())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    match run(command).await {
        Ok(drafts) => match serde_json::to_string_pretty(&drafts) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to render recipes: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) if e.is_retryable_by_rephrasing() => {
            error!("{}", e);
            eprintln!("Could not generate a recipe, try rephrasing your description.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
