use todo_server::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    todo_server::init_tracing();

    let config = Config::from_env()?;
    todo_server::run(config).await
}
