use archive_ui::controller::{
    CATEGORY_NAME_FIELD, DESCRIPTION_FIELD, DOCUMENT_NAME_FIELD, ELEMENT_FIELD, LARGE_FIELD,
    PASSWORD_FIELD, PROPERTY_NAME_FIELD, SMALL_FIELD,
};
use archive_ui::{
    ApiClient, AppError, Controller, Page, PageEvent, RecordingPage, Route, load_session,
    persist_session, resolve_session_path,
};
use clap::{Parser, Subcommand};
use reqwest::Url;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Drives the archive web UI actions from the command line.
#[derive(Debug, Parser)]
#[command(name = "archive_ui", version)]
struct Cli {
    /// Base URL of the archive web server
    #[arg(long, env = "ARCHIVE_URL", default_value = "http://127.0.0.1:8627")]
    url: Url,

    /// Cookie jar file holding the session password
    #[arg(long)]
    session: Option<PathBuf>,

    /// Location the action is performed from
    #[arg(long, default_value = "/")]
    path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the page-load hook
    Ready,
    Connect {
        password: String,
    },
    Disconnect,
    /// Enter the archive without a password
    Guest,
    /// Navigate to a page path
    Goto {
        path: String,
    },
    AddCategory {
        name: String,
        #[arg(long = "property")]
        properties: Vec<String>,
    },
    AddDocument {
        name: String,
    },
    AddElement,
    AddDescription {
        #[arg(long)]
        element: String,
        description: String,
    },
    AddOrder {
        #[arg(long)]
        large: String,
        #[arg(long)]
        small: String,
    },
    AddOrderRule {
        #[arg(long)]
        large: String,
        #[arg(long)]
        small: String,
    },
    Analyze,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session_path = cli.session.clone().unwrap_or_else(resolve_session_path);
    let session = load_session(&session_path).await;
    info!(url = %cli.url, state = ?session.state(), "starting");

    let page = RecordingPage::at(cli.path.clone());
    let mut controller = Controller::new(ApiClient::new(cli.url.clone()), session, page);
    run(&mut controller, cli.command).await?;

    let (session, page) = controller.into_parts();
    for event in page.events() {
        match event {
            PageEvent::Alert(message) => println!("alert: {message}"),
            PageEvent::Navigate(path) => println!("navigate: {path}"),
            PageEvent::Reload => println!("reload: {}", page.path()),
        }
    }

    persist_session(&session_path, &session).await?;
    Ok(())
}

async fn run(controller: &mut Controller<RecordingPage>, command: Command) -> Result<(), AppError> {
    match command {
        Command::Ready => controller.ready(),
        Command::Connect { password } => {
            controller.page_mut().set_field(PASSWORD_FIELD, &password);
            controller.connect().await;
        }
        Command::Disconnect => controller.disconnect(),
        Command::Guest => controller.enter_as_guest(),
        Command::Goto { path } => {
            let route = Route::parse(&path)
                .ok_or_else(|| AppError::new(format!("unknown page '{path}'")))?;
            controller.view(route);
        }
        Command::AddCategory { name, properties } => {
            for property in properties {
                controller.page_mut().set_field(PROPERTY_NAME_FIELD, &property);
                controller.add_property();
            }
            controller.page_mut().set_field(CATEGORY_NAME_FIELD, &name);
            controller.add_category().await;
        }
        Command::AddDocument { name } => {
            controller.page_mut().set_field(DOCUMENT_NAME_FIELD, &name);
            controller.add_document().await;
        }
        Command::AddElement => controller.add_element().await,
        Command::AddDescription {
            element,
            description,
        } => {
            let page = controller.page_mut();
            page.set_field(ELEMENT_FIELD, &element);
            page.set_field(DESCRIPTION_FIELD, &description);
            controller.add_description().await;
        }
        Command::AddOrder { large, small } => {
            let page = controller.page_mut();
            page.set_field(LARGE_FIELD, &large);
            page.set_field(SMALL_FIELD, &small);
            controller.add_order().await;
        }
        Command::AddOrderRule { large, small } => {
            let page = controller.page_mut();
            page.set_field(LARGE_FIELD, &large);
            page.set_field(SMALL_FIELD, &small);
            controller.add_order_rule().await;
        }
        Command::Analyze => controller.analyze().await,
    }
    Ok(())
}
