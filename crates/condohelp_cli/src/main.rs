//! Operator CLI for the condominium help center.
//!
//! # Responsibility
//! - Run help searches and FAQ listings against the configured database.
//! - Seed help content and inspect the built-in audit policy.

use clap::{Parser, Subcommand};
use condohelp_core::api::search_endpoint;
use condohelp_core::db::open_db;
use condohelp_core::{
    all_faqs_ordered, init_logging, ArticleDraft, ArticleRepository, AuditPolicy, FaqDraft,
    FaqRepository, HelpSearchService, HelpdeskConfig, SqliteArticleRepository,
    SqliteFaqRepository,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "condohelp", version, about = "Condominium help center tools")]
struct Cli {
    /// Overrides CONDOHELP_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search FAQs and articles and print the JSON payload.
    Search {
        /// Free-text query.
        q: Vec<String>,
    },
    /// List every FAQ in display order.
    Faqs,
    /// Insert an FAQ entry.
    AddFaq {
        #[arg(long)]
        question: String,
        #[arg(long, default_value = "")]
        answer: String,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        sort_order: i64,
    },
    /// Insert a help article.
    AddArticle {
        #[arg(long)]
        section: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, default_value = "")]
        url_path: String,
    },
    /// Show the audit decision for one table.
    Audit { table: String },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("condohelp: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = HelpdeskConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    match cli.command {
        Command::Search { q } => {
            let conn = open_db(&config.db_path)?;
            let service = HelpSearchService::new(config.help_search_options());
            let payload = search_endpoint(&conn, &service, &q.join(" "));
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Faqs => {
            let conn = open_db(&config.db_path)?;
            for faq in all_faqs_ordered(&conn)? {
                println!("{}\t{}\t{}", faq.sort_order, faq.id, faq.question);
            }
        }
        Command::AddFaq {
            question,
            answer,
            keywords,
            sort_order,
        } => {
            let conn = open_db(&config.db_path)?;
            let mut draft = FaqDraft::new(question, answer).with_sort_order(sort_order);
            draft.keywords = keywords;
            let id = SqliteFaqRepository::new(&conn).create_faq(&draft)?;
            info!("event=faq_create module=cli status=ok id={id}");
            println!("{id}");
        }
        Command::AddArticle {
            section,
            title,
            body,
            url_path,
        } => {
            let conn = open_db(&config.db_path)?;
            let mut draft = ArticleDraft::new(section, title, url_path);
            draft.body_text = body;
            let id = SqliteArticleRepository::new(&conn).create_article(&draft)?;
            info!("event=article_create module=cli status=ok id={id}");
            println!("{id}");
        }
        Command::Audit { table } => {
            let policy = AuditPolicy::with_defaults();
            println!("audited={}", policy.is_audited(&table));
            println!("sensitive={}", policy.sensitive_fields_for(&table).join(","));
        }
    }

    Ok(())
}
