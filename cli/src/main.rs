use clap::{Parser, Subcommand};
use ecolearn::game::{ProgressEvent, ProgressStore};
use ecolearn::model::entity::{UserEntity, UserEntityCreateUpdate};
use ecolearn::model::{CrudRepository, DbConnection, ModelManager};
use ecolearn::web::AuthenticatedUser;

#[derive(Parser, Debug)]
#[command(about = "Admin tool for the ecolearn backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Inspect or adjust a user's progress
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },

    /// Create the demo accounts (student@demo.com, teacher@demo.com)
    Seed,
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "student")]
        role: String,
    },
    List {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

/// Progress management
#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    Show {
        #[arg(long)]
        email: String,
    },
    /// Award (or with a negative amount, revoke) points
    Award {
        #[arg(long)]
        email: String,
        #[arg(long)]
        points: i64,
    },
}

async fn user_by_email(
    mm: &ModelManager,
    actor: &AuthenticatedUser,
    email: &str,
) -> ecolearn::error::AppResult<UserEntity> {
    let found = UserEntity::find_by_email(mm, actor, email).await?;
    match found {
        Some(user) => Ok(user),
        None => {
            eprintln!("No user with email {email}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> ecolearn::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect(&std::env::var("DATABASE_URL").unwrap())?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::admin();

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add { name, email, role } => {
                let user =
                    UserEntity::create(&mm, &actor, UserEntityCreateUpdate { name, email, role })
                        .await?;
                println!("User created: {:?}", user);
            }

            UserCommands::List { limit } => {
                let users = UserEntity::list(&mm, &actor, limit, 0).await?;
                for user in users {
                    println!("{}  {}  {}  {}", user.id(), user.email(), user.role(), user.name());
                }
            }
        },

        Commands::Progress { action } => match action {
            ProgressCommands::Show { email } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                let progress = ProgressStore::load(&mm, user.id()).await?;

                println!("{} <{}>", user.name(), user.email());
                println!("  points: {}  level: {}", progress.points, progress.level);
                println!(
                    "  lessons: {}  challenges: {}  certificates: {}",
                    progress.completed_lessons.len(),
                    progress.completed_challenges.len(),
                    progress.certificates.len()
                );
                for badge in progress.badges.iter().filter(|b| b.earned) {
                    println!("  badge: {} ({})", badge.name, badge.id);
                }
            }

            ProgressCommands::Award { email, points } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                let events = [ProgressEvent::PointsAwarded { amount: points }];
                let progress = ProgressStore::apply_events(&mm, user.id(), &events).await?;
                println!(
                    "Awarded {} points, now at {} (level {})",
                    points, progress.points, progress.level
                );
            }
        },

        Commands::Seed => {
            let demo = [
                ("Alex Green", "student@demo.com", "student"),
                ("Dr. Earth", "teacher@demo.com", "teacher"),
            ];
            for (name, email, role) in demo {
                let found = UserEntity::find_by_email(&mm, &actor, email).await?;
                if found.is_some() {
                    println!("{email} already exists, skipping");
                    continue;
                }
                let user = UserEntity::create(
                    &mm,
                    &actor,
                    UserEntityCreateUpdate {
                        name: name.to_string(),
                        email: email.to_string(),
                        role: role.to_string(),
                    },
                )
                .await?;
                println!("Seeded {} <{}>", user.name(), user.email());
            }
        }
    }

    Ok(())
}
