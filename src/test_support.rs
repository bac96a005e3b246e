// Shared fixtures for unit tests.

use serde_json::{Value, json};

/// Minimal repository listing entry owned by `someone`.
pub fn repo_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("someone/{name}"),
        "owner": { "id": 1, "login": "someone" },
        "html_url": format!("https://github.com/someone/{name}"),
        "description": null,
        "homepage": null,
        "topics": [],
        "language": null,
        "fork": false,
        "stargazers_count": 0,
        "forks_count": 0,
        "updated_at": "2024-01-01T00:00:00Z",
        "created_at": "2023-01-01T00:00:00Z"
    })
}

/// Profile payload as the users endpoint returns it.
pub fn profile_json() -> Value {
    json!({
        "login": "someone",
        "name": "Some One",
        "bio": "Writes code",
        "avatar_url": "https://avatars.example.com/u/1",
        "public_repos": 2,
        "followers": 10,
        "following": 5,
        "created_at": "2020-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}
