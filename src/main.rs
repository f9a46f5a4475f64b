use clap::Parser;
use reconset::adapters::pretty_printer::PrettyPrinter;
use reconset::config::{AppConfig, Cli, Command, RemoveTarget};
use reconset::utils::error::{ErrorSeverity, ReconError};
use reconset::utils::{logger, validation::Validate};
use reconset::{DomainStore, ProjectManager, RedisStore};
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 載入配置 (日誌尚未初始化，錯誤直接輸出)
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    let warnings = config.apply_env_overrides();

    // 初始化日誌
    if let Err(e) = logger::init_cli_logger(cli.verbose, &config.logging) {
        eprintln!("❌ Failed to initialise logging: {}", e);
        std::process::exit(1);
    }
    for warning in warnings {
        tracing::warn!("{}", warning);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let exit_code = match RedisStore::connect(&config.redis).await {
        Ok(store) => {
            let manager = ProjectManager::new(store);
            match run(cli.command, &manager, &config).await {
                Ok(code) => code,
                Err(e) => report(&e),
            }
        }
        Err(e) => report(&e),
    };

    std::process::exit(exit_code);
}

fn report(e: &ReconError) -> i32 {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

async fn run<S: DomainStore>(
    command: Command,
    manager: &ProjectManager<S>,
    config: &AppConfig,
) -> reconset::Result<i32> {
    match command {
        Command::Add {
            project,
            file,
            no_validate,
        } => {
            let result = manager.add_from_source(&project, &file, !no_validate).await?;
            println!("{}", result.summary());
            if result.invalid > 0 {
                println!("Skipped {} invalid domains", result.invalid);
            }
            Ok(0)
        }

        Command::Remove {
            project,
            file,
            domain,
        } => match RemoveTarget::from_args(file, domain) {
            Some(RemoveTarget::File(file)) => {
                let result = manager.remove_from_source(&project, &file).await?;
                println!("{}", result.summary());
                Ok(0)
            }
            Some(RemoveTarget::Domain(domain)) => {
                if manager.remove_domain(&project, &domain).await? {
                    println!("Domain '{}' removed from project '{}'", domain, project);
                    Ok(0)
                } else {
                    eprintln!("Domain '{}' not found in project '{}'", domain, project);
                    Ok(1)
                }
            }
            None => Err(ReconError::ConfigError {
                message: "remove needs exactly one of --file or --domain".to_string(),
            }),
        },

        Command::Export {
            project,
            file,
            format,
        } => {
            let count = manager.export(&project, Path::new(&file), &format).await?;
            println!("✅ Exported {} domains to {}", count, file);
            Ok(0)
        }

        Command::Print {
            project,
            filter,
            pretty,
        } => {
            let filter = filter
                .map(|pattern| {
                    Regex::new(&pattern).map_err(|e| ReconError::InvalidConfigValueError {
                        field: "--filter".to_string(),
                        value: pattern.clone(),
                        reason: e.to_string(),
                    })
                })
                .transpose()?;

            let domains = manager.domains(&project, filter.as_ref()).await?;
            if domains.is_empty() {
                tracing::warn!("No domains found in project '{}'", project);
                return Ok(0);
            }

            if pretty {
                match &config.printer {
                    Some(printer) => match PrettyPrinter::new(printer).render(&domains).await {
                        Ok(output) => {
                            print!("{}", output);
                            return Ok(0);
                        }
                        Err(e) => tracing::warn!("{}; falling back to plain listing", e),
                    },
                    None => tracing::warn!("No [printer] configured; falling back to plain listing"),
                }
            }

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for domain in &domains {
                writeln!(out, "{}", domain)?;
            }
            Ok(0)
        }

        Command::Count { project } => {
            let count = manager.count(&project).await?;
            println!("{}", count);
            Ok(0)
        }

        Command::Delete { project, confirm } => {
            if !confirm && !confirm_delete(&project)? {
                tracing::info!("Delete operation cancelled");
                return Ok(0);
            }

            if manager.delete(&project).await? {
                println!("Project '{}' deleted", project);
                Ok(0)
            } else {
                eprintln!("Project '{}' does not exist", project);
                Ok(1)
            }
        }

        Command::Projects => {
            let projects = manager.projects().await?;
            if projects.is_empty() {
                tracing::warn!("No projects found");
            }
            for project in projects {
                println!("{}", project);
            }
            Ok(0)
        }
    }
}

fn confirm_delete(project: &str) -> io::Result<bool> {
    print!(
        "Are you sure you want to delete ALL domains in project '{}'? (y/N): ",
        project
    );
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    Ok(matches!(
        response.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
