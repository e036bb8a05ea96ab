//! Lists the first page of users and shows one profile.
//!
//! Run with: `cargo run --example list_users -- octocat`

use hubdir::endpoint::{GetUserParams, ListUsersParams};
use hubdir::{Client, Error, UserRepository, UserRepositoryImpl};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("hubdir=debug,list_users=info")
        .init();

    let username = std::env::args().nth(1).unwrap_or_else(|| "octocat".to_string());

    let client = Client::builder().build()?;
    let repo = UserRepositoryImpl::new(client);

    println!("=== First page ===");
    match repo.list_users_decoded(ListUsersParams::new(5, 0)).await {
        Ok(users) => {
            for user in users {
                println!("#{:<8} {:<20} {}", user.id, user.login, user.html_url);
            }
        }
        Err(e) => eprintln!("Could not list users: {e}"),
    }
    println!();

    println!("=== {username} ===");
    match repo.get_user_decoded(GetUserParams::new(username)).await {
        Ok(details) => {
            println!("Name:      {}", details.name);
            println!("Blog:      {}", details.blog);
            println!("Location:  {}", details.location.as_deref().unwrap_or("-"));
            println!("Followers: {}", details.followers);
            println!("Following: {}", details.following);
        }
        Err(Error::NotFound) => eprintln!("No such user"),
        Err(e) => eprintln!("Could not fetch user: {e}"),
    }

    Ok(())
}
