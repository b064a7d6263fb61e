use env_logger::Env;
use gst_invoice::server::{self, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid server configuration: {e}");
            std::process::exit(1);
        }
    };
    server::run(config).await
}
