mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use sporty_api::database::models::event::OPEN_REGISTRATION;

/// All events visible through the API, first hundred is plenty for fixtures
async fn fetch_all_events(
    server: &common::TestServer,
    client: &reqwest::Client,
    token: &str,
) -> Result<Vec<Value>> {
    let res = client
        .get(format!(
            "{}/api/v1/all_events?per_page=100",
            server.base_url
        ))
        .bearer_auth(token)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "all_events failed: {}",
        res.status()
    );

    let payload = res.json::<Value>().await?;
    Ok(payload["data"].as_array().cloned().unwrap_or_default())
}

fn event_with_open_registration(events: &[Value], open: bool) -> Option<(i64, String)> {
    events.iter().find_map(|event| {
        let is_open = event["status"] == OPEN_REGISTRATION;
        if is_open != open {
            return None;
        }
        Some((event["id"].as_i64()?, event["name"].as_str()?.to_string()))
    })
}

#[tokio::test]
async fn test_01_event_routes_require_auth() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in ["events", "all_events", "join_event/1", "leave_event/1"] {
        let res = client
            .get(format!("{}/api/v1/{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path: {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn test_02_all_events_is_an_enveloped_collection() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_, _, token) = common::register_user(server, &client, "allevents").await?;

    let res = client
        .get(format!("{}/api/v1/all_events", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<Value>().await?;
    assert_eq!(payload["success"], true);
    assert!(payload["data"].is_array());
    assert!(payload["number_of_records"].is_i64() || payload["number_of_records"].is_u64());
    assert!(payload["pagination"]["total_records"].is_i64() || payload["pagination"]["total_records"].is_u64());
    Ok(())
}

#[tokio::test]
async fn test_03_join_unknown_event_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_, _, token) = common::register_user(server, &client, "nojoin").await?;

    let res = client
        .get(format!("{}/api/v1/join_event/99999999", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_04_join_and_leave_lifecycle() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_, _, token) = common::register_user(server, &client, "lifecycle").await?;

    let events = fetch_all_events(server, &client, &token).await?;
    let Some((event_id, event_name)) = event_with_open_registration(&events, true) else {
        return Ok(());
    };

    // Fresh user starts with no joined events
    let mine = client
        .get(format!("{}/api/v1/events", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let mine = mine.json::<Value>().await?;
    assert_eq!(mine["number_of_records"], 0);

    // Join
    let join = client
        .get(format!("{}/api/v1/join_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(join.status(), StatusCode::OK);
    let join = join.json::<Value>().await?;
    assert_eq!(
        join["data"],
        format!("Congratulations. You signed up for event: {}", event_name)
    );

    // Joining again conflicts
    let again = client
        .get(format!("{}/api/v1/join_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let again = again.json::<Value>().await?;
    assert_eq!(
        again["message"],
        format!("You are already signed up for this event ({}).", event_name)
    );

    // The joined event now shows up under /events
    let mine = client
        .get(format!("{}/api/v1/events", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let mine = mine.json::<Value>().await?;
    assert_eq!(mine["number_of_records"], 1);
    assert_eq!(mine["data"][0]["id"], event_id);

    // Leave
    let leave = client
        .get(format!("{}/api/v1/leave_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(leave.status(), StatusCode::OK);
    let leave = leave.json::<Value>().await?;
    assert_eq!(
        leave["data"],
        format!("You have been signed out of the event ({})", event_name)
    );

    // Leaving again conflicts
    let again = client
        .get(format!("{}/api/v1/leave_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let again = again.json::<Value>().await?;
    assert_eq!(
        again["message"],
        format!("You are not participating in this event ({}).", event_name)
    );
    Ok(())
}

#[tokio::test]
async fn test_05_leave_without_joining_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_, _, token) = common::register_user(server, &client, "neverjoined").await?;

    let events = fetch_all_events(server, &client, &token).await?;
    let Some((event_id, _)) = event_with_open_registration(&events, true) else {
        return Ok(());
    };

    let res = client
        .get(format!("{}/api/v1/leave_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn test_06_closed_event_refuses_joins() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_, _, token) = common::register_user(server, &client, "closedjoin").await?;

    let events = fetch_all_events(server, &client, &token).await?;
    let Some((event_id, event_name)) = event_with_open_registration(&events, false) else {
        return Ok(());
    };

    let res = client
        .get(format!("{}/api/v1/join_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let payload = res.json::<Value>().await?;
    assert_eq!(
        payload["message"],
        format!(
            "Joining for this event ({}) is currently unavailable.",
            event_name
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_07_closed_event_traps_participants() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (mail, _, token) = common::register_user(server, &client, "trapped").await?;

    let events = fetch_all_events(server, &client, &token).await?;
    let Some((event_id, event_name)) = event_with_open_registration(&events, false) else {
        return Ok(());
    };

    // The API cannot sign anyone up for a closed event, so plant the
    // participation row directly to exercise the leave gate
    let _ = dotenvy::dotenv();
    let Ok(pool) = sporty_api::database::manager::DatabaseManager::pool().await else {
        return Ok(());
    };
    let user = sporty_api::database::users::find_by_mail(pool, &mail)
        .await?
        .expect("registered user exists");
    sqlx::query("INSERT INTO participation (user_id, event_id) VALUES ($1, $2)")
        .bind(user.id)
        .bind(event_id as i32)
        .execute(pool)
        .await?;

    let res = client
        .get(format!("{}/api/v1/leave_event/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let payload = res.json::<Value>().await?;
    assert_eq!(
        payload["message"],
        format!(
            "It is no longer possible to leave an event ({}) at this time.",
            event_name
        )
    );

    // Clean up the planted row
    sqlx::query("DELETE FROM participation WHERE user_id = $1 AND event_id = $2")
        .bind(user.id)
        .bind(event_id as i32)
        .execute(pool)
        .await?;
    Ok(())
}
