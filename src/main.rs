use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pathwise::ai::{FunctionsClient, Role};
use pathwise::app::command::{self, Command, ParseResult};
use pathwise::app::{
    App, Assistant, FlowError, GenerationStage, OnboardingForm, Screen, Transition, WizardStage,
};
use pathwise::auth::{self, Credentials};
use pathwise::config::Config;
use pathwise::config::session::Session;
use pathwise::learning::{FormatFilter, StepAction};
use pathwise::model::{LearningGoal, PreferredFormat, SkillLevel, StepStatus};
use pathwise::store::{RestStore, TableStore};
use pathwise::ui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

type CliApp = App<RestStore, FunctionsClient>;

#[derive(Parser)]
#[command(name = "pathwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Store the session token issued by the auth provider
    Login {
        /// Bearer token
        #[arg(long)]
        token: String,
        /// Id of the user the token belongs to
        #[arg(long)]
        user_id: Uuid,
    },
    /// Forget the stored session
    Logout,
    /// Describe what you want to learn and generate a path
    ///
    /// Without --topic the questions are asked one by one.
    Onboard {
        #[arg(long)]
        topic: Option<String>,
        /// beginner, intermediate or advanced
        #[arg(long, value_parser = parse_skill)]
        skill: Option<SkillLevel>,
        /// job, exam, skill_upgrade or personal_interest
        #[arg(long, value_parser = parse_goal)]
        goal: Option<LearningGoal>,
        /// videos, text, projects or mixed
        #[arg(long)]
        format: Option<String>,
        /// Hours per day (1-8)
        #[arg(long)]
        hours: Option<u32>,
        /// Days per week (1-7)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Generate a path for a saved preference
    Generate {
        /// Preference id reported by a failed onboarding
        preference_id: Uuid,
    },
    /// List your learning paths
    Dashboard,
    /// Show a path timeline (defaults to the current path)
    Path { id: Option<Uuid> },
    /// Work on a step
    Step {
        #[command(subcommand)]
        action: StepCommand,
    },
    /// Chat with the AI assistant
    Chat {
        /// Scope the conversation to a path
        #[arg(long)]
        path: Option<Uuid>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Change a setting
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum StepCommand {
    /// Start a step, generating its content if needed
    Start { id: Option<Uuid> },
    /// Show a step's content
    Open {
        id: Option<Uuid>,
        /// Only show images, videos, text or mixed
        #[arg(long, value_parser = parse_filter)]
        format: Option<FormatFilter>,
    },
    /// Mark a step as done
    Complete { id: Option<Uuid> },
    /// Send a completed step back to not started
    Reset { id: Option<Uuid> },
}

fn parse_skill(s: &str) -> Result<SkillLevel, String> {
    SkillLevel::parse(s).ok_or_else(|| format!("unknown skill level '{}'", s))
}

fn parse_goal(s: &str) -> Result<LearningGoal, String> {
    LearningGoal::parse(s).ok_or_else(|| format!("unknown learning goal '{}'", s))
}

fn parse_filter(s: &str) -> Result<FormatFilter, String> {
    match s.trim().to_lowercase().as_str() {
        "images" | "image" => Ok(FormatFilter::Images),
        "videos" | "video" => Ok(FormatFilter::Videos),
        "text" => Ok(FormatFilter::Text),
        "mixed" | "all" => Ok(FormatFilter::Mixed),
        _ => Err(format!("unknown format '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<FlowError>() {
            Some(flow) => eprintln!("{}", ui::error(flow)),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Some(Commands::Config { action }) => match action {
            Some(ConfigAction::Set { key, value }) => {
                config.set(&key, &value)?;
                config.save()?;
                println!("Saved {}", key);
            }
            Some(ConfigAction::Show) | None => show_config(&config)?,
        },
        Some(Commands::Login { token, user_id }) => {
            let credentials = Credentials::new(token, user_id)?;
            credentials.save()?;
            println!("Signed in as {} ({})", user_id, auth::mask_token(&credentials.access_token));
        }
        Some(Commands::Logout) => {
            Credentials::clear()?;
            println!("Signed out");
        }
        Some(Commands::Onboard { topic, skill, goal, format, hours, days }) => {
            let app = build_app(&config)?;
            let form = match topic {
                Some(topic) => {
                    let mut form = OnboardingForm::default();
                    form.topic = topic;
                    form.skill_level = skill.unwrap_or(form.skill_level);
                    form.learning_goal = goal.unwrap_or(form.learning_goal);
                    if let Some(format) = format {
                        form.preferred_format = PreferredFormat::parse_lenient(&format);
                    }
                    form.set_hours_per_day(hours.unwrap_or(form.hours_per_day()))?;
                    form.set_days_per_week(days.unwrap_or(form.days_per_week()))?;
                    form
                }
                None => match run_wizard(&mut io::stdin().lock())? {
                    Some(form) => form,
                    None => {
                        println!("Onboarding cancelled");
                        return Ok(());
                    }
                },
            };
            let transition = app.submit_onboarding(&form, &mut print_stage).await;
            finish_generation(&app, &config, transition).await?;
        }
        Some(Commands::Generate { preference_id }) => {
            let app = build_app(&config)?;
            let transition = app.retry_generation(preference_id, &mut print_stage).await;
            finish_generation(&app, &config, transition).await?;
        }
        Some(Commands::Dashboard) | None => {
            let app = build_app(&config)?;
            let dashboard = app.load_dashboard().await?;
            println!("{}", ui::dashboard::render(&dashboard));
        }
        Some(Commands::Path { id }) => {
            let app = build_app(&config)?;
            let mut session = Session::load()?;
            let path_id = match id.or(session.current_path_id) {
                Some(id) => id,
                None => bail!("No current path. Pick one from `pathwise dashboard`"),
            };
            show_timeline(&app, &config, path_id).await?;
            session.open_path(path_id);
            session.save()?;
        }
        Some(Commands::Step { action }) => {
            let app = build_app(&config)?;
            run_step(&app, &config, action).await?;
        }
        Some(Commands::Chat { path }) => {
            let app = build_app(&config)?;
            run_chat(&app, &config, path).await?;
        }
    }

    Ok(())
}

/// Build the store and function clients, signed in when credentials exist
fn build_app(config: &Config) -> Result<CliApp> {
    config.ensure_store()?;

    let credentials = Credentials::current();
    if credentials.is_none() {
        tracing::debug!("No stored credentials, using the anon key");
    }
    let token = credentials
        .as_ref()
        .map(|c| c.access_token.clone())
        .unwrap_or_else(|| config.anon_key.clone());

    let store =
        RestStore::new(&config.store_url, &config.anon_key, &token, config.request_timeout())?;
    let functions_base = config.functions_base().context("AI functions URL not configured")?;
    let backend = FunctionsClient::new(functions_base, &token, config.request_timeout())?;

    Ok(App::new(
        Arc::new(store),
        Arc::new(backend),
        credentials.map(|c| c.user_id),
        config.generation_pacing(),
    ))
}

fn show_config(config: &Config) -> Result<()> {
    println!("Config file: {}", Config::config_path()?.display());
    println!("store-url            {}", or_unset(&config.store_url));
    let anon_key = match config.anon_key.as_str() {
        "" => "(unset)".to_string(),
        key => auth::mask_token(key),
    };
    println!("anon-key             {}", anon_key);
    println!(
        "functions-url        {}",
        config.functions_base().unwrap_or_else(|| "(unset)".into())
    );
    println!("generation-pacing-ms {}", config.generation_pacing_ms);
    println!(
        "request-timeout-secs {}",
        config.request_timeout_secs.map(|s| s.to_string()).unwrap_or_else(|| "none".into())
    );
    println!("text-width           {}", config.text_width);
    match Credentials::current() {
        Some(credentials) => println!("signed in as         {}", credentials.user_id),
        None => println!("signed in as         (nobody)"),
    }
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}

fn print_stage(stage: GenerationStage) {
    eprintln!("{}", stage.message());
}

/// Report the outcome of a generation and show the new path
async fn finish_generation(app: &CliApp, config: &Config, transition: Transition) -> Result<()> {
    let Transition { screen, notice } = transition;
    let failure = notice.as_ref().filter(|n| n.is_error()).map(ui::notice);
    if let Some(notice) = notice.as_ref().filter(|n| !n.is_error()) {
        println!("{}", ui::notice(notice));
    }

    match screen {
        Screen::Path(path_id) => {
            let mut session = Session::load()?;
            session.open_path(path_id);
            session.save()?;
            println!();
            show_timeline(app, config, path_id).await?;
        }
        Screen::Onboarding { orphaned_preference: Some(preference_id) } => {
            eprintln!(
                "Your preferences were saved. Retry with: pathwise generate {}",
                preference_id
            );
        }
        _ => {}
    }

    match failure {
        Some(failure) => bail!(failure),
        None => Ok(()),
    }
}

async fn show_timeline(app: &CliApp, config: &Config, path_id: Uuid) -> Result<()> {
    let timeline = app.load_timeline(path_id).await?;
    println!("{}", ui::timeline::render(&timeline, config.text_width));
    Ok(())
}

async fn run_step(app: &CliApp, config: &Config, action: StepCommand) -> Result<()> {
    let mut session = Session::load()?;

    let (id, filter) = match &action {
        StepCommand::Start { id } | StepCommand::Complete { id } | StepCommand::Reset { id } => {
            (*id, None)
        }
        StepCommand::Open { id, format } => (*id, *format),
    };
    let step_id = match id.or_else(|| session.current_path_id.and_then(|p| session.last_step(p))) {
        Some(id) => id,
        None => bail!("No step given and no step opened before"),
    };
    let step = app.store().get_step(step_id).await?.ok_or(FlowError::NotFound("Step"))?;
    let path_id = step.path_id;

    match action {
        StepCommand::Start { .. } => {
            if step.status == StepStatus::NotStarted {
                eprintln!("Preparing step content...");
            }
            let transition = app.perform(path_id, step_id, StepAction::Start).await?;
            if let Screen::Step { .. } = transition.screen {
                show_step(app, config, path_id, step_id, None).await?;
            }
            session.record_step(path_id, step_id);
        }
        StepCommand::Open { .. } => {
            show_step(app, config, path_id, step_id, filter).await?;
            session.record_step(path_id, step_id);
        }
        StepCommand::Complete { .. } => {
            let transition = app.mark_done(path_id, step_id).await?;
            show_transition(app, config, transition).await?;
        }
        StepCommand::Reset { .. } => {
            let transition = app.perform(path_id, step_id, StepAction::Reset).await?;
            show_transition(app, config, transition).await?;
        }
    }

    session.save()?;
    Ok(())
}

async fn show_step(
    app: &CliApp,
    config: &Config,
    path_id: Uuid,
    step_id: Uuid,
    filter: Option<FormatFilter>,
) -> Result<()> {
    let view = app.open_step(path_id, step_id, filter).await?;
    if view.generated {
        eprintln!("Generated content for this step");
    }
    println!("{}", ui::step::render(&view, config.text_width));
    Ok(())
}

async fn show_transition(app: &CliApp, config: &Config, transition: Transition) -> Result<()> {
    if let Some(notice) = &transition.notice {
        println!("{}\n", ui::notice(notice));
    }
    if let Screen::Path(path_id) = transition.screen {
        show_timeline(app, config, path_id).await?;
    }
    Ok(())
}

/// Ask the onboarding questions on stdin; `None` when input ends early
fn run_wizard(input: &mut impl BufRead) -> Result<Option<OnboardingForm>> {
    let mut form = OnboardingForm::default();
    println!("Let's build your learning path. Enter < to go back.\n");

    loop {
        let stage = form.stage();
        println!("Step {} of {}: {}", stage.number(), WizardStage::all().len(), stage.question());
        println!("  {}", stage.hint());

        match stage {
            WizardStage::Topic => {
                let Some(answer) = read_answer(input, "> ")? else { return Ok(None) };
                form.topic = answer;
            }
            WizardStage::SkillLevel => {
                let labels: Vec<&str> = SkillLevel::all().iter().map(|s| s.label()).collect();
                match choose(input, &labels)? {
                    Choice::Picked(i) => form.skill_level = SkillLevel::all()[i],
                    Choice::Back => {
                        form.back();
                        continue;
                    }
                    Choice::Keep => {}
                    Choice::Eof => return Ok(None),
                }
            }
            WizardStage::Goal => {
                let labels: Vec<&str> = LearningGoal::all().iter().map(|g| g.label()).collect();
                match choose(input, &labels)? {
                    Choice::Picked(i) => form.learning_goal = LearningGoal::all()[i],
                    Choice::Back => {
                        form.back();
                        continue;
                    }
                    Choice::Keep => {}
                    Choice::Eof => return Ok(None),
                }
            }
            WizardStage::Format => {
                let choices = PreferredFormat::onboarding_choices();
                let labels: Vec<&str> = choices.iter().map(|f| f.label()).collect();
                match choose(input, &labels)? {
                    Choice::Picked(i) => form.preferred_format = choices[i],
                    Choice::Back => {
                        form.back();
                        continue;
                    }
                    Choice::Keep => {}
                    Choice::Eof => return Ok(None),
                }
            }
            WizardStage::Time => {
                let prompt = format!("Hours per day [{}]: ", form.hours_per_day());
                let Some(hours) = read_answer(input, &prompt)? else { return Ok(None) };
                if hours == "<" {
                    form.back();
                    continue;
                }
                if let Err(e) = set_number(&hours, |n| form.set_hours_per_day(n)) {
                    eprintln!("{}", e);
                    continue;
                }
                let prompt = format!("Days per week [{}]: ", form.days_per_week());
                let Some(days) = read_answer(input, &prompt)? else { return Ok(None) };
                if let Err(e) = set_number(&days, |n| form.set_days_per_week(n)) {
                    eprintln!("{}", e);
                    continue;
                }
                return Ok(Some(form));
            }
        }

        if let Err(e) = form.next() {
            eprintln!("{}", e);
        }
        println!();
    }
}

enum Choice {
    Picked(usize),
    Keep,
    Back,
    Eof,
}

fn choose(input: &mut impl BufRead, labels: &[&str]) -> Result<Choice> {
    for (i, label) in labels.iter().enumerate() {
        println!("  {}. {}", i + 1, label);
    }
    loop {
        let Some(answer) = read_answer(input, "> ")? else { return Ok(Choice::Eof) };
        if answer.is_empty() {
            return Ok(Choice::Keep);
        }
        if answer == "<" {
            return Ok(Choice::Back);
        }
        let by_number =
            answer.parse::<usize>().ok().filter(|n| (1..=labels.len()).contains(n)).map(|n| n - 1);
        let by_name = labels.iter().position(|l| l.eq_ignore_ascii_case(&answer));
        match by_number.or(by_name) {
            Some(i) => return Ok(Choice::Picked(i)),
            None => eprintln!("Pick 1-{}", labels.len()),
        }
    }
}

/// Empty answers keep the current value
fn set_number(answer: &str, set: impl FnOnce(u32) -> Result<(), FlowError>) -> Result<()> {
    if answer.is_empty() {
        return Ok(());
    }
    let n: u32 = answer.parse().context("Expected a number")?;
    set(n)?;
    Ok(())
}

fn read_answer(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

async fn run_chat(app: &CliApp, config: &Config, path_id: Option<Uuid>) -> Result<()> {
    let title = path_title(app, path_id).await?;
    println!("{}\n", ui::chat::banner(title.as_deref()));
    if !app.is_signed_in() {
        eprintln!("Not signed in; messages will not be sent.");
    }

    let mut assistant = Assistant::new(path_id);
    assistant.toggle();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let Some(line) = read_answer(&mut input, "> ")? else { break };

        match command::parse_line(&line) {
            ParseResult::Ok(Command::Say(text)) => {
                let before = assistant.messages().len();
                assistant.submit(app.backend(), &text, app.is_signed_in()).await;
                for message in &assistant.messages()[before..] {
                    if message.role == Role::Assistant {
                        println!("{}\n", ui::chat::turn(message, config.text_width));
                    }
                }
            }
            ParseResult::Ok(Command::Quit) => break,
            ParseResult::Ok(Command::Help) => println!("{}", ui::chat::help()),
            ParseResult::Ok(Command::Clear) => {
                assistant.clear();
                println!("Conversation cleared");
            }
            ParseResult::Ok(Command::Path(path_id)) => {
                let title = path_title(app, path_id).await?;
                assistant.set_path(path_id);
                println!("{}", ui::chat::banner(title.as_deref()));
            }
            ParseResult::Ok(Command::Nop) => {}
            ParseResult::UnknownCommand(cmd) => eprintln!("Unknown command :{}. Type :help", cmd),
            ParseResult::MissingArgument(cmd) => eprintln!(":{} needs an argument", cmd),
            ParseResult::InvalidArgument { command, argument } => {
                eprintln!("Invalid argument for :{}: {}", command, argument)
            }
        }
    }

    assistant.leave();
    Ok(())
}

async fn path_title(app: &CliApp, path_id: Option<Uuid>) -> Result<Option<String>> {
    let Some(path_id) = path_id else { return Ok(None) };
    match app.store().get_path(path_id).await? {
        Some(path) => Ok(Some(path.title)),
        None => Err(FlowError::NotFound("Path").into()),
    }
}
