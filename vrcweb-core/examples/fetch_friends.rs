// File: vrcweb-core/examples/fetch_friends.rs
//
// Log in with credentials from the environment and list every friend:
//
//   VRC_USERNAME=... VRC_PASSWORD=... cargo run --example fetch_friends

use anyhow::Context;
use vrcweb_core::VRCWebApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let user_name = std::env::var("VRC_USERNAME").context("VRC_USERNAME not set")?;
    let password = std::env::var("VRC_PASSWORD").context("VRC_PASSWORD not set")?;

    let mut client = VRCWebApiClient::new()?;
    let api_key = client.get_api_key().await?;
    client.login(&user_name, &password, &api_key).await?;

    let (status, user) = client.try_get_current_user().await?;
    let Some(user) = user else {
        anyhow::bail!("cookie rejected with HTTP {status}; two-factor auth may be required");
    };
    println!("logged in as {} ({})", user.name, user.id);

    let friends = client.get_all_friends().await?;
    println!("{} friends:", friends.len());
    for friend in &friends {
        println!("  {} [{}]", friend.name, friend.status);
    }
    Ok(())
}
