use std::env;
use std::io;
use std::process::ExitCode;

use storefront::csv::{read_actions, write_cart};
use storefront::{Catalog, Storefront};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let (Some(catalog_path), Some(script_path)) = (args.next(), args.next()) else {
        eprintln!("usage: storefront <catalog.json|catalog.csv> <actions.csv>");
        return ExitCode::from(2);
    };

    let catalog = match Catalog::load(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(path = %catalog_path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    let actions = match read_actions(script_path.clone()) {
        Ok(actions) => actions,
        Err(e) => {
            error!(path = %script_path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = Storefront::new(catalog);
    info!(
        products = store.catalog().products().len(),
        categories = store.categories().len(),
        discount = %store.pricing().discount_label(),
        "catalog loaded"
    );
    let (action_sender, action_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in actions {
            match result {
                Ok(action) => {
                    if action_sender.send(action).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    store
        .run(ReceiverStream::new(action_receiver), |notification| {
            eprintln!("{notification}");
        })
        .await;

    if let Err(e) = write_cart(io::stdout().lock(), &store) {
        error!("failed to write cart: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
