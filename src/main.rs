// veche-client/src/main.rs
use clap::{Parser, Subcommand};
use log::{error, info};
use std::env;
use std::process::ExitCode;
use uuid::Uuid;
use veche_client::models::{group_by_party_and_status, Status, VoteTally, VoteValue};
use veche_client::utils::datetime::{format_eu_instant, time_left};
use veche_client::{ApiClient, AuthSession, ClientConfig, ClientError};

#[derive(Parser)]
#[command(name = "veche")]
#[command(about = "Command-line client for the Veche governance platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and show the claims of the issued credential
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Show the company and its members per party
    Company,

    /// List parties
    Parties,

    /// List discussions grouped by party and status
    Discussions,

    /// Show one discussion
    Discussion { id: Uuid },

    /// Set the status of a discussion
    SetStatus {
        id: Uuid,

        /// waiting, voting, final-voting, resolved or archived (wait, resolve and archive also work)
        status: String,
    },

    /// Vote on a discussion
    Vote {
        id: Uuid,

        /// agree or disagree
        value: String,

        /// Required for disagree while voting
        #[arg(short, long)]
        argument: Option<String>,
    },

    /// Comment on a discussion
    Comment { id: Uuid, content: String },

    /// List voting sessions
    Sessions,
}

fn parse_vote(value: &str) -> Result<VoteValue, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "agree" => Ok(VoteValue::Agree),
        "disagree" => Ok(VoteValue::Disagree),
        other => Err(ClientError::Validation(format!("Unknown vote: {}", other))),
    }
}

// The credential is memory-only, so every run signs in again or refreshes
async fn sign_in(session: &mut AuthSession) -> Result<(), ClientError> {
    if let (Ok(email), Ok(password)) = (env::var("VECHE_EMAIL"), env::var("VECHE_PASSWORD")) {
        return session.login(&email, &password).await;
    }
    if !session.boot().await {
        info!("Continuing without a session");
    }
    Ok(())
}

async fn run(command: Commands, session: &mut AuthSession) -> Result<(), ClientError> {
    if let Commands::Login { email, password } = &command {
        session.login(email, password).await?;
        if let Some(claims) = session.claims() {
            println!("Signed in as {} ({} parties)", claims.sub, claims.party_ids.len());
            println!(
                "post discussions: {}, manage sessions: {}, manage users: {}",
                claims.can_post_discussions, claims.can_manage_sessions, claims.can_manage_users
            );
        }
        return Ok(());
    }

    sign_in(session).await?;
    let client: &ApiClient = session.client();

    match command {
        Commands::Login { .. } => {}
        Commands::Company => match client.my_company().await? {
            Some(company) => {
                println!("{}", company.name);
                for roster in company.members_by_party() {
                    println!("  {} ({})", roster.party_name, roster.members.len());
                    for member in roster.members {
                        println!("    {}", member);
                    }
                }
            }
            None => println!("No company"),
        },
        Commands::Parties => {
            let parties = client.list_parties().await?;
            let mine = session.my_parties(&parties);
            for party in &parties {
                let marker = if mine.contains(&party) { "*" } else { " " };
                println!("{} {}  {}", marker, party.id, party.name);
            }
        }
        Commands::Discussions => {
            let discussions = client.list_discussions().await?;
            for group in group_by_party_and_status(&discussions) {
                println!("{}", group.party_name);
                for bucket in group.statuses {
                    println!("  {} ({})", bucket.status, bucket.items.len());
                    for d in bucket.items {
                        println!("    {}  {}", d.id, d.subject);
                    }
                }
            }
        }
        Commands::Discussion { id } => {
            let d = client.get_discussion(id).await?;
            println!("{} [{}]", d.subject, d.status);
            println!("{} · {} · {}", d.party.name, d.creator_name, format_eu_instant(d.created_at, &chrono::Local));
            println!();
            println!("{}", d.content);
            if d.status.is_read_only() {
                let tally = VoteTally::from_votes(&d.votes);
                println!();
                println!("Agree {} / Disagree {}", tally.agree, tally.disagree);
            }
            for action in &d.actions {
                match action.proposal() {
                    Some(proposal) => println!("Action: {:?}", proposal),
                    None => println!("Action: {} (unreadable payload)", action.action_type),
                }
            }
            if d.status.accepts_comments() || d.status.is_read_only() {
                for comment in client.list_comments(id).await? {
                    println!("- {}: {}", comment.creator.name, comment.content);
                }
            }
        }
        Commands::SetStatus { id, status } => {
            let target = Status::parse(&status)
                .ok_or_else(|| ClientError::Validation(format!("Unknown status: {}", status)))?;
            let current = client.get_discussion(id).await?;
            client.change_discussion_status(&current, target).await?;
            println!("Status changed to {}", target);
        }
        Commands::Vote { id, value, argument } => {
            let value = parse_vote(&value)?;
            let discussion = client.get_discussion(id).await?;
            client.cast_vote(&discussion, value, argument.as_deref()).await?;
            println!("Voted {}", value);
        }
        Commands::Comment { id, content } => {
            let discussion = client.get_discussion(id).await?;
            let content = veche_client::models::check_comment(discussion.status, &content)
                .map_err(ClientError::Validation)?;
            client.post_comment(id, &content).await?;
            println!("Comment posted");
        }
        Commands::Sessions => {
            let sessions = client.list_voting_sessions().await?;
            for group in group_by_party_and_status(&sessions) {
                println!("{}", group.party_name);
                for bucket in group.statuses {
                    println!("  {}", bucket.status);
                    for s in bucket.items {
                        let ends = s.end_time.map(|t| t.to_rfc3339());
                        println!(
                            "    {}  {}  ({} discussions, ends in {})",
                            s.id,
                            s.name,
                            s.discussions.len(),
                            time_left(ends.as_deref(), chrono::Utc::now())
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

#[actix_rt::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using API at {}", config.api_base);

    let client = match ApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut session = AuthSession::new(client);

    match run(cli.command, &mut session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} ({})", e, e.kind().error_page());
            ExitCode::FAILURE
        }
    }
}
