use globalcare_api::infra::config::AppConfig;
use globalcare_api::infra::mail::{MailRelay, SmtpRelay};
use globalcare_api::storage::document;
use globalcare_api::UploadStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-mail]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL, SMTP_USERNAME, SMTP_PASSWORD\n\
         Optional:\n\
           SMTP_HOST, SMTP_PORT, UPLOAD_DIR, PORT, CORS_ALLOWED_ORIGINS, MAIL_FROM\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let skip_mail = args.iter().any(|a| a == "--skip-mail");

    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    println!("  PORT={}", config.port);
    println!("  UPLOAD_DIR={}", config.upload_dir.display());
    println!("  SMTP={}:{} as {}", config.smtp.host, config.smtp.port, config.smtp.username);
    println!("  CORS origins: {}", config.cors_origins.join(", "));

    // Store connectivity (also creates the schema when missing)
    let store = document::connect(&config.database_url, 1)
        .await
        .map_err(|e| anyhow::anyhow!("Store unreachable: {:#}", e))?;
    store.ping().await?;
    store.close().await;
    println!("  Store reachable.");

    // Uploads directory is created and checked for writes
    let uploads = UploadStore::open(&config.upload_dir).await?;
    println!("  Uploads directory writable: {}", uploads.dir().display());

    if skip_mail {
        println!("  Skipping SMTP check (--skip-mail).");
    } else {
        let relay = SmtpRelay::new(&config.smtp)?;
        relay
            .check()
            .await
            .map_err(|e| anyhow::anyhow!("SMTP relay check failed: {}", e))?;
        println!("  SMTP relay accepted credentials.");
    }

    println!("> Preflight OK.");
    Ok(())
}
