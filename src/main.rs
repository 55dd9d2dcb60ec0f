use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use intern_client::models::{parse_skills, InternshipDraft};
use intern_client::{
    auth, ApplicationStatus, ClientConfig, EngagementFacade, HttpApi, Identity, ProfileFields,
    Role, SessionStore,
};

#[derive(Parser)]
#[command(name = "internmatch")]
#[command(about = "Internship marketplace client - profiles, recommendations, applications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum)]
        role: Role,
    },

    /// Register a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum)]
        role: Role,
    },

    /// Clear the stored session
    Logout,

    /// Manage the candidate profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show ranked job recommendations
    Recommend,

    /// Apply to a recommended job
    Apply {
        /// Job id from the recommendation list
        job_id: String,
    },

    /// Post an internship opening (organization)
    Post {
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Comma-separated list, e.g. "React, Node"
        #[arg(long)]
        skills: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "1")]
        openings: u32,
        /// Days until the application deadline
        #[arg(long)]
        deadline: Option<u32>,
        #[arg(long)]
        women_preference: bool,
    },

    /// List applicants for the signed-in company (organization)
    Applicants,
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the stored profile
    Show,

    /// Save (create or update) the profile
    Save {
        #[arg(long)]
        name: String,
        /// Comma-separated list, e.g. "React, Node"
        #[arg(long)]
        skills: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        education: String,
        #[arg(long)]
        stream: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;
    let sessions = SessionStore::new(config.session_path.clone());
    let api = HttpApi::new(&config).map_err(|e| anyhow!(e))?;

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => {
            let credentials = auth::Credentials {
                email,
                password,
                role,
            };
            let identity = auth::login(&api, &credentials)
                .await
                .map_err(|e| anyhow!("{}", e))?;
            sessions.save(&identity).await?;
            println!("Logged in as {} ({})", identity.actor_id, identity.role);
        }

        Commands::Register {
            email,
            password,
            role,
        } => {
            let credentials = auth::Credentials {
                email,
                password,
                role,
            };
            auth::register(&api, &credentials)
                .await
                .map_err(|e| anyhow!("{}", e))?;
            println!("Registered {}. You can now log in.", credentials.email);
        }

        Commands::Logout => {
            sessions.clear().await?;
            println!("Session cleared.");
        }

        Commands::Profile { command } => {
            let identity = require_session(&sessions).await?;
            let mut facade = EngagementFacade::new(api, identity);

            match command {
                ProfileCommands::Show => {
                    let state = facade.load_profile().await.map_err(|e| anyhow!("{}", e))?;
                    match state.profile_id() {
                        Some(id) => {
                            let fields = state.fields();
                            println!("Profile {}", id);
                            println!("  Name:      {}", fields.full_name);
                            println!(
                                "  Skills:    {}",
                                fields.skills.iter().cloned().collect::<Vec<_>>().join(", ")
                            );
                            println!("  Location:  {}", fields.location);
                            println!("  Education: {}", fields.education);
                            println!("  Stream:    {}", fields.stream);
                        }
                        None => println!("No profile saved yet. Use 'profile save' to create one."),
                    }
                }

                ProfileCommands::Save {
                    name,
                    skills,
                    location,
                    education,
                    stream,
                } => {
                    let fields = ProfileFields {
                        full_name: name,
                        skills: parse_skills(&skills),
                        location,
                        education,
                        stream,
                    };
                    let id = facade
                        .save_profile(fields)
                        .await
                        .map_err(|e| anyhow!("{}", e))?;
                    println!("Profile saved (id: {})", id);
                }
            }
        }

        Commands::Recommend => {
            let identity = require_session(&sessions).await?;
            let mut facade = EngagementFacade::new(api, identity);

            facade.load_profile().await.map_err(|e| anyhow!("{}", e))?;
            let jobs = facade
                .refresh_recommendations()
                .await
                .map_err(|e| anyhow!("{}", e))?;

            if jobs.is_empty() {
                println!("No internship openings found for your profile.");
            } else {
                for job in jobs {
                    println!(
                        "{}  {} at {}  [{}% match]",
                        job.job_id,
                        job.job_title,
                        job.company_name,
                        job.match_score.round()
                    );
                    println!(
                        "      {} | openings: {} | apply within: {}",
                        job.location,
                        job.openings,
                        job.deadline_days
                            .map(|d| format!("{} days", d))
                            .unwrap_or_else(|| "N/A".to_string()),
                    );
                    if let (Some(skill), Some(score)) =
                        (&job.predicted_skill, job.predicted_score)
                    {
                        println!(
                            "      learn {} to improve your match to {}%",
                            skill,
                            score.round()
                        );
                    }
                }
            }
        }

        Commands::Apply { job_id } => {
            let identity = require_session(&sessions).await?;
            let mut facade = EngagementFacade::new(api, identity);

            facade.load_profile().await.map_err(|e| anyhow!("{}", e))?;
            facade
                .refresh_recommendations()
                .await
                .map_err(|e| anyhow!("{}", e))?;

            match facade.apply_to_job(&job_id).await {
                Ok(ApplicationStatus::Applied) => println!("Applied to job {}.", job_id),
                Ok(status) => println!("Job {} is {}.", job_id, status),
                Err(e) => return Err(anyhow!("{}", e)),
            }
        }

        Commands::Post {
            company_name,
            title,
            description,
            skills,
            location,
            openings,
            deadline,
            women_preference,
        } => {
            let identity = require_session(&sessions).await?;
            let desk = intern_client::OrganizationDesk::new(api, identity)
                .map_err(|e| anyhow!("{}", e))?;

            let draft = InternshipDraft {
                company_name,
                job_title: title,
                job_description: description,
                skills_required: parse_skills(&skills).into_iter().collect(),
                location,
                women_preference,
                openings,
                deadline,
            };
            desk.post_opening(&draft).await.map_err(|e| anyhow!("{}", e))?;
            println!("Internship posted: {}", draft.job_title);
        }

        Commands::Applicants => {
            let identity = require_session(&sessions).await?;
            let desk = intern_client::OrganizationDesk::new(api, identity)
                .map_err(|e| anyhow!("{}", e))?;

            let rows = desk.applicants().await.map_err(|e| anyhow!("{}", e))?;
            if rows.is_empty() {
                println!("No candidates have applied yet.");
            } else {
                println!("{:<8} {:<24} {:<28} {:<12}", "APP#", "CANDIDATE", "JOB", "STATUS");
                println!("{}", "-".repeat(72));
                for row in rows {
                    println!(
                        "{:<8} {:<24} {:<28} {:<12}",
                        row.application_number, row.user_name, row.job_title, row.status
                    );
                }
            }
        }
    }

    Ok(())
}

async fn require_session(sessions: &SessionStore) -> Result<Identity> {
    sessions
        .load()
        .await?
        .ok_or_else(|| anyhow!("Not logged in. Run 'internmatch login' first."))
}
