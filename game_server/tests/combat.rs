mod support;

use serde_json::Value;
use wolves_server::domain::GameRules;

// Every cell of a 2x2 board neighbours every other, so any two pieces can collide.
fn base_url() -> &'static str {
    support::ensure_server(GameRules {
        board_size: 2,
        max_players: 2,
        visibility_radius: 2,
    })
}

fn position(player: &Value) -> (i64, i64) {
    (
        player["position"]["row"].as_i64().expect("row"),
        player["position"]["col"].as_i64().expect("col"),
    )
}

fn axis(delta: i64) -> char {
    match delta {
        -1 => '-',
        0 => '0',
        _ => '1',
    }
}

fn token_towards(from: (i64, i64), to: (i64, i64)) -> String {
    [axis(to.0 - from.0), axis(to.1 - from.1)].iter().collect()
}

// Two joins fill the game, which starts it.
async fn full_game(client: &reqwest::Client, base_url: &str) -> (u64, Value, Value) {
    let game_id = support::create_game(client, base_url).await;
    let wolf = support::join_game(client, base_url, game_id, "Wolf").await;
    let villager = support::join_game(client, base_url, game_id, "Villager").await;
    (game_id, wolf, villager)
}

#[tokio::test]
async fn test_wolf_capture_ends_game() {
    let base_url = base_url();
    let client = reqwest::Client::new();
    let (game_id, wolf, villager) = full_game(&client, base_url).await;
    let wolf_id = wolf["player_id"].as_u64().expect("wolf id");
    let villager_id = villager["player_id"].as_u64().expect("villager id");

    let token = token_towards(position(&wolf), position(&villager));
    let result = support::submit_move(&client, base_url, game_id, wolf_id, &token).await;

    assert_eq!(result["accepted"], true);
    assert_eq!(result["outcome"], "captured");
    assert_eq!(result["position"], villager["position"]);
    assert_eq!(result["round_in_progress"], -1);

    let (_, status) = support::get_json(
        &client,
        format!("{base_url}/games/{game_id}/players/{wolf_id}/status"),
    )
    .await;
    assert_eq!(status["winner"], "Wolves");
    assert_eq!(status["started"], false);

    let (board_status, body) = support::get_json(
        &client,
        format!("{base_url}/games/{game_id}/players/{villager_id}/board"),
    )
    .await;
    assert_eq!(board_status, reqwest::StatusCode::CONFLICT);
    assert_eq!(body["message"], "player is dead");

    let again = support::submit_move(&client, base_url, game_id, wolf_id, &token).await;
    assert_eq!(again["accepted"], false);
}

#[tokio::test]
async fn test_villager_walking_into_wolf_dies_in_place() {
    let base_url = base_url();
    let client = reqwest::Client::new();
    let (game_id, wolf, villager) = full_game(&client, base_url).await;
    let wolf_id = wolf["player_id"].as_u64().expect("wolf id");
    let villager_id = villager["player_id"].as_u64().expect("villager id");

    let token = token_towards(position(&villager), position(&wolf));
    let result = support::submit_move(&client, base_url, game_id, villager_id, &token).await;

    assert_eq!(result["accepted"], true);
    assert_eq!(result["outcome"], "died");
    assert!(result["position"].is_null());

    let (_, status) = support::get_json(
        &client,
        format!("{base_url}/games/{game_id}/players/{villager_id}/status"),
    )
    .await;
    assert_eq!(status["alive"], false);
    assert_eq!(status["winner"], "Wolves");

    let (_, view) = support::get_json(
        &client,
        format!("{base_url}/games/{game_id}/players/{wolf_id}/board"),
    )
    .await;
    let cells: Vec<char> = view["visible_cells"].as_str().expect("cells").chars().collect();
    let index = |(row, col): (i64, i64)| (row * 2 + col) as usize;
    assert_eq!(cells[index(position(&wolf))], 'W');
    assert_eq!(cells[index(position(&villager))], 'D');
}

#[tokio::test]
async fn test_third_join_is_rejected_once_full() {
    let base_url = base_url();
    let client = reqwest::Client::new();
    let (game_id, _, _) = full_game(&client, base_url).await;

    let res = client
        .post(format!("{base_url}/games/{game_id}/players"))
        .json(&serde_json::json!({ "player_name": "Extra" }))
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::CONFLICT);
}
