// ============================================================================
// LazyLedger - Point d'entrée
// ============================================================================
// Construit une fois les objets partagés (client HTTP, stores), charge la
// première page de transactions et l'affiche dans le terminal.
//
// CONCEPTS RUST CLÉS :
// 1. Async dans sync : tokio::runtime::Runtime pour les appels API
// 2. Arc : stores partagés explicitement, pas de singleton global
// ============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use lazyledger::api::{
    ApiClient, ClientConfig, CollectingNotifier, FileStorage, KeyValueStorage, MemoryStorage,
};
use lazyledger::store::{AccountStore, TransactionStore};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les logs vont dans un fichier (rotation quotidienne) pour ne pas se
// mélanger avec la sortie du programme.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ./logs/lazyledger.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazyledger=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazyledger.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazyledger, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyledger=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

/// Stockage du jeton : fichier utilisateur, ou mémoire si aucun
/// répertoire de données n'est disponible
fn open_storage() -> Arc<dyn KeyValueStorage> {
    match FileStorage::default_location() {
        Some(path) => {
            info!(path = %path.display(), "Using file storage");
            Arc::new(FileStorage::new(path))
        }
        None => {
            warn!("No data directory, access token will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyLedger starting up");

    // Objets partagés, construits une seule fois
    let config = ClientConfig::from_env();
    info!(api_root = %config.api_root(), "Loaded client configuration");

    let notifier = Arc::new(CollectingNotifier::new());
    let client = Arc::new(ApiClient::standard(config, open_storage(), notifier.clone())?);
    let transactions = Arc::new(TransactionStore::new(client.clone()));
    let accounts = Arc::new(AccountStore::new());

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        accounts.fetch_accounts().await;
        transactions.fetch_transactions(None, None).await
    });

    // Notifications en attente (une par requête échouée)
    for message in notifier.take() {
        eprintln!("✗ {}", message);
    }

    match result {
        Ok(()) => {
            let state = transactions.snapshot();
            println!(
                "📒 Transactions : page {} ({} par page), {} au total\n",
                state.page + 1,
                state.size,
                state.total
            );
            for tx in &state.list {
                println!("  {}", tx.display());
            }
            info!(count = state.list.len(), "Application exited normally");
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "Application exited with error");
            Err(e).context("Échec du chargement des transactions")
        }
    }
}
