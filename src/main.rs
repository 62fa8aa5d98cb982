use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use studybot::generation::{
    GenerationService, HttpGenerationClient, OfflineGenerator, QuizQuestion, QuizRequest,
    Resource, StudyPlan, markup,
};
use studybot::session::ConfigField;
use studybot::{App, Config, SessionController};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Width used when printing plans to the terminal
const PRINT_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "studybot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the study service (overrides config and environment)
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Build plans locally instead of calling the study service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a study plan and print it
    Plan {
        /// Subject to study
        #[arg(short, long)]
        topic: String,
        /// How long you have, e.g. "5" or "2 weeks"
        #[arg(short, long)]
        duration: String,
        /// Comma-separated lessons to cover
        #[arg(short, long, default_value = "")]
        lessons: String,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a quiz and print it with its answer key
    Quiz {
        /// Subject to be quizzed on
        #[arg(short, long)]
        topic: String,
        /// Number of questions (defaults to the configured value)
        #[arg(short = 'n', long)]
        questions: Option<u32>,
        /// Print the questions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config,
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "studybot=info".into());

    if tui {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn build_service(config: &Config, offline: bool) -> Result<Arc<dyn GenerationService>> {
    if offline {
        tracing::info!("Using offline plan generator");
        return Ok(Arc::new(OfflineGenerator));
    }

    let client = HttpGenerationClient::new(&config.service_url, config.request_timeout())
        .context("Failed to create HTTP client")?;
    tracing::info!("Using study service at {}", client.base_url());
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.command.is_none())?;

    let mut config = Config::load()?;
    if let Some(url) = cli.service_url {
        config.service_url = url;
    }

    match cli.command {
        Some(Commands::Plan { topic, duration, lessons, json }) => {
            let service = build_service(&config, cli.offline)?;
            print_plan(&config, service.as_ref(), topic, duration, lessons, json).await?;
        }
        Some(Commands::Quiz { topic, questions, json }) => {
            let service = build_service(&config, cli.offline)?;
            print_quiz(&config, service.as_ref(), topic, questions, json).await?;
        }
        Some(Commands::Config) => {
            print_config(&config)?;
        }
        None => {
            // Launch TUI
            let service = build_service(&config, cli.offline)?;
            let mut app = App::new(&config, service)?;
            app.run().await?;
        }
    }

    Ok(())
}

async fn print_plan(
    config: &Config,
    service: &dyn GenerationService,
    topic: String,
    duration: String,
    lessons: String,
    json: bool,
) -> Result<()> {
    let mut session = SessionController::new(config.session_settings());
    session.update_config(ConfigField::Topic, topic);
    session.update_config(ConfigField::Duration, duration);
    session.update_config(ConfigField::Lessons, lessons);

    session.run_start_studying(service).await.context("Failed to create study plan")?;
    let dashboard = session.dashboard().context("No study plan was produced")?;

    if json {
        let output = serde_json::json!({
            "plan": dashboard.plan,
            "resources": dashboard.resources,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Studying: {}", session.config().topic.trim());
    println!();
    print!("{}", render_plan(&dashboard.plan));
    println!();
    print!("{}", render_resources(&dashboard.resources));
    Ok(())
}

async fn print_quiz(
    config: &Config,
    service: &dyn GenerationService,
    topic: String,
    questions: Option<u32>,
    json: bool,
) -> Result<()> {
    let settings = config.session_settings();
    let request = QuizRequest {
        topic: topic.trim().to_string(),
        num_questions: questions.unwrap_or(settings.num_questions).max(1),
        quiz_type: settings.quiz_type,
    };
    anyhow::ensure!(!request.topic.is_empty(), "Please provide a topic");

    let questions = service.generate_quiz(&request).await.context("Failed to generate quiz")?;
    tracing::info!("Received {} quiz questions", questions.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        print!("{}", render_quiz(&questions));
    }
    Ok(())
}

fn print_config(config: &Config) -> Result<()> {
    println!("Config file:      {}", Config::config_path()?.display());
    println!("Log file:         {}", Config::log_path()?.display());
    println!("Service URL:      {}", config.service_url);
    println!("Request timeout:  {}s", config.request_timeout().as_secs());
    println!("Difficulty:       {}", config.difficulty);
    println!("Quiz questions:   {}", config.num_questions);
    println!("Quiz type:        {}", config.quiz_type.as_deref().unwrap_or("(service default)"));
    println!("Require lessons:  {}", config.require_lessons);
    println!("Default days:     {}", config.default_days);
    println!("Theme:            {}", config.active_theme().name);
    Ok(())
}

fn render_plan(plan: &StudyPlan) -> String {
    let mut out = String::new();
    match plan {
        StudyPlan::Structured(days) => {
            let task_options = textwrap::Options::new(PRINT_WIDTH)
                .initial_indent("  - ")
                .subsequent_indent("    ");
            for day in days {
                let mut header = format!("Day {}", day.day);
                if day.quiz {
                    header.push_str(" [quiz]");
                }
                if day.review {
                    header.push_str(" [review]");
                }
                out.push_str(&header);
                out.push('\n');
                for task in &day.tasks {
                    out.push_str(&textwrap::fill(task, &task_options));
                    out.push('\n');
                }
            }
        }
        StudyPlan::Rendered(document) => {
            for line in markup::to_plain_text(document).lines() {
                out.push_str(&textwrap::fill(line, PRINT_WIDTH));
                out.push('\n');
            }
        }
    }
    out
}

fn render_resources(resources: &[Resource]) -> String {
    let mut out = String::from("Resources\n");
    for resource in resources {
        out.push_str(&format!(
            "  [{}] {} - {}\n",
            resource.kind.label(),
            resource.title,
            resource.url
        ));
    }
    out
}

fn render_quiz(questions: &[QuizQuestion]) -> String {
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, question.question));
        for (j, option) in question.options.iter().enumerate() {
            out.push_str(&format!("   {}) {}\n", option_letter(j), option));
        }
        out.push('\n');
    }

    let key: Vec<String> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}-{}", i + 1, option_letter(q.correct_answer)))
        .collect();
    out.push_str(&format!("Answer key: {}\n", key.join(", ")));
    out
}

fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use studybot::generation::{ResourceKind, StudyDay};

    use super::*;

    #[test]
    fn cli_parses_plan_command() {
        let cli = Cli::try_parse_from([
            "studybot",
            "--offline",
            "plan",
            "--topic",
            "Algebra",
            "--duration",
            "2 weeks",
        ])
        .unwrap();
        assert!(cli.offline);
        match cli.command {
            Some(Commands::Plan { topic, duration, lessons, json }) => {
                assert_eq!(topic, "Algebra");
                assert_eq!(duration, "2 weeks");
                assert_eq!(lessons, "");
                assert!(!json);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "studybot",
            "quiz",
            "--topic",
            "Algebra",
            "-n",
            "3",
            "--service-url",
            "http://example.test",
        ])
        .unwrap();
        assert_eq!(cli.service_url.as_deref(), Some("http://example.test"));
        assert!(matches!(cli.command, Some(Commands::Quiz { questions: Some(3), .. })));
    }

    #[test]
    fn plan_renders_days_and_flags() {
        let mut day = StudyDay::new(1, vec!["Read chapter 1".into()]);
        day.review = true;
        let plan = StudyPlan::Structured(vec![day]);
        assert_eq!(render_plan(&plan), "Day 1 [review]\n  - Read chapter 1\n");
    }

    #[test]
    fn resources_render_with_kind() {
        let resources = vec![Resource {
            title: "Khan Academy".into(),
            url: "https://www.khanacademy.org".into(),
            kind: ResourceKind::Video,
        }];
        assert_eq!(
            render_resources(&resources),
            "Resources\n  [video] Khan Academy - https://www.khanacademy.org\n"
        );
    }

    #[test]
    fn quiz_renders_answer_key() {
        let questions = vec![QuizQuestion {
            question: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_answer: 1,
        }];
        assert_eq!(render_quiz(&questions), "1. 2 + 2?\n   A) 3\n   B) 4\n\nAnswer key: 1-B\n");
    }
}
