use anyhow::Result;
use serde_json::json;

use jsonplaceholder_cli::logging::init_tracing;
use jsonplaceholder_cli::UserApiClient;

/// Demonstration sequence: each operation invoked once against the live
/// JSONPlaceholder API with fixed sample values. The first failure aborts
/// the whole run.
fn main() -> Result<()> {
    init_tracing();

    let client = UserApiClient::new();

    let new_user = json!({
        "name": "John Doe",
        "username": "johndoe",
        "email": "john.doe@example.com",
    });
    let created_user = client.create_user(&new_user)?;
    println!("Created user: {}", created_user);

    let partial_user = json!({
        "name": "Updated Name",
        "username": "updated_username",
    });
    let updated_user = client.update_user(1, &partial_user)?;
    println!("Updated user: {}", updated_user);

    let delete_result = client.delete_user(1)?;
    println!("Delete result: {}", delete_result);

    println!("All users: ");
    for user in client.get_all_users()? {
        println!("{}", user);
    }

    let user_by_id = client.get_user_by_id(1)?;
    println!("User by id 1: {}", user_by_id);

    match client.get_user_by_username("Bret")? {
        Some(user) => println!("User by username Bret: {}", user),
        None => println!("User by username Bret: not found"),
    }

    client.fetch_and_save_comments_for_last_post_of_user(1)?;
    println!("Comments fetched and saved successfully.");

    Ok(())
}
