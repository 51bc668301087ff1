//! Сквозные тесты: настоящий axum сервер на случайном порту, бэкенд
//! кинотеатров подменён wiremock.

use cinema_admin::{app, config::Config, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "token-123";

async fn spawn_app(upstream: &MockServer) -> String {
    let base_url = upstream.uri();
    let config = Config::from_lookup(|name| match name {
        "UPSTREAM_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Полностью размеченный зал 15x10, все клетки свободны.
fn placeable_hall() -> Vec<Value> {
    let mut seats = Vec::new();
    for row in 0..15 {
        for col in 0..10 {
            seats.push(json!({
                "row": row,
                "col": col,
                "typeId": 0,
                "rootRow": row,
                "rootCol": col
            }));
        }
    }
    seats
}

async fn mount_seats(upstream: &MockServer, screen_id: i64, seats: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/admin/screen/{}/seat", screen_id)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(seats))
        .mount(upstream)
        .await;
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn loads_layout_with_screen_header() {
    let upstream = MockServer::start().await;
    mount_seats(&upstream, 7, placeable_hall()).await;
    Mock::given(method("GET"))
        .and(path("/admin/cinema/screen/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Hall 7",
            "screenType": {"id": 2, "name": "IMAX"}
        })))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/screens/7/seats", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["layout"]["initialized"], true);
    assert_eq!(body["layout"]["screen"]["name"], "Hall 7");
    assert_eq!(body["layout"]["seats"].as_array().unwrap().len(), 15);
    assert_eq!(body["layout"]["seats"][3][4]["typeName"], "Placeable");
}

#[tokio::test]
async fn bed_placement_submits_footprint_first() {
    let upstream = MockServer::start().await;
    mount_seats(&upstream, 1, placeable_hall()).await;
    Mock::given(method("PUT"))
        .and(path("/admin/screen/1/seat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/1/seats/place", base))
        .bearer_auth(TOKEN)
        .json(&json!({"row": 13, "col": 8, "typeId": 4}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|request| request.method.as_str() == "PUT")
        .unwrap();
    let payload: Vec<Value> = put.body_json().unwrap();

    assert_eq!(payload.len(), 150);
    let footprint: Vec<(i64, i64)> = payload[..4]
        .iter()
        .map(|seat| (seat["row"].as_i64().unwrap(), seat["col"].as_i64().unwrap()))
        .collect();
    assert_eq!(footprint, vec![(13, 8), (13, 9), (14, 8), (14, 9)]);
    for seat in &payload[..4] {
        assert_eq!(seat["typeId"], 4);
        assert_eq!(seat["rootRow"], 13);
        assert_eq!(seat["rootCol"], 8);
    }
    assert!(payload[4..].iter().all(|seat| seat["typeId"] == 0));
}

#[tokio::test]
async fn out_of_bounds_placement_is_rejected_locally() {
    let upstream = MockServer::start().await;
    mount_seats(&upstream, 1, placeable_hall()).await;
    Mock::given(method("PUT"))
        .and(path("/admin/screen/1/seat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/1/seats/place", base))
        .bearer_auth(TOKEN)
        .json(&json!({"row": 14, "col": 8, "typeId": 4}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not enough space for a Bed seat at row 14, col 8");
}

#[tokio::test]
async fn blocked_cell_is_rejected() {
    let upstream = MockServer::start().await;
    let mut seats = placeable_hall();
    seats[0]["typeId"] = json!(-1);
    mount_seats(&upstream, 1, seats).await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/1/seats/place", base))
        .bearer_auth(TOKEN)
        .json(&json!({"row": 0, "col": 0, "typeId": 3}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn upstream_rejection_of_token_is_unauthorized() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/screen/3/seat"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/cinema/screen/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "Hall 3"})))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/screens/3/seats", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Authentication required. Please log in again.");
}

#[tokio::test]
async fn upstream_forbidden_is_unauthorized_without_retry() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/movie"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/movies", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Authentication required. Please log in again.");
}

#[tokio::test]
async fn upstream_failure_message_is_passed_through() {
    let upstream = MockServer::start().await;
    mount_seats(&upstream, 1, placeable_hall()).await;
    Mock::given(method("PUT"))
        .and(path("/admin/screen/1/seat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Seat map is locked"})),
        )
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/1/seats/place", base))
        .bearer_auth(TOKEN)
        .json(&json!({"row": 2, "col": 2, "typeId": 2}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Seat map is locked");
}

#[tokio::test]
async fn upstream_failure_without_message_uses_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/movie"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/movies", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch movies");
}

#[tokio::test]
async fn requests_without_bearer_token_never_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/screens/1/seats", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_seat_type_is_a_bad_request() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/1/seats/place", base))
        .bearer_auth(TOKEN)
        .json(&json!({"row": 0, "col": 0, "typeId": 9}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn initialize_posts_root_records_for_empty_screen() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/screen/5/seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&upstream)
        .await;
    mount_seats(&upstream, 5, placeable_hall()).await;
    Mock::given(method("POST"))
        .and(path("/admin/screen/5/seat"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/5/seats/initialize", base))
        .bearer_auth(TOKEN)
        .json(&json!({"paints": [
            {"row": 0, "col": 0, "typeId": 4},
            {"row": 0, "col": 2, "typeId": 3},
            {"row": 5, "col": 5, "typeId": 2}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|request| request.method.as_str() == "POST")
        .unwrap();
    let records: Vec<Value> = post.body_json().unwrap();

    // кровать занимает 4 клетки, диван 2, в записи попадают только корни
    assert_eq!(records.len(), 150 - 3 - 1);
    let find = |row: i64, col: i64| {
        records
            .iter()
            .find(|r| r["row"] == row && r["col"] == col)
            .cloned()
    };
    assert_eq!(find(0, 0).unwrap()["typeId"], 4);
    assert!(find(1, 1).is_none());
    assert_eq!(find(0, 2).unwrap()["typeId"], 3);
    assert!(find(0, 3).is_none());
    assert_eq!(find(5, 5).unwrap()["typeId"], 2);
}

#[tokio::test]
async fn initialize_refuses_screen_with_seats() {
    let upstream = MockServer::start().await;
    mount_seats(&upstream, 5, placeable_hall()).await;
    Mock::given(method("POST"))
        .and(path("/admin/screen/5/seat"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/screens/5/seats/initialize", base))
        .bearer_auth(TOKEN)
        .json(&json!({"paints": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn seat_type_registry_is_public() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let types: Vec<Value> = client()
        .get(format!("{}/api/seat-types", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(types.len(), 6);
    let bed = types.iter().find(|t| t["typeId"] == 4).unwrap();
    assert_eq!(bed["footprint"], json!({"rows": 2, "cols": 2}));
}

#[tokio::test]
async fn schedule_move_is_snapped_preview() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/cinema/1/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "screenId": 10,
                "screenName": "Hall A",
                "schedules": [{
                    "scheduleId": 100,
                    "movieId": 1,
                    "movieName": "Dune",
                    "startDateTime": "2025-03-14T18:00:00",
                    "movieLength": 155,
                    "status": 1
                }]
            },
            {"screenId": 20, "screenName": "Hall B", "schedules": []}
        ])))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/cinemas/1/schedule/move", base))
        .bearer_auth(TOKEN)
        .json(&json!({"itemId": 100, "dragTime": "2025-03-14T19:22:10", "groupIndex": 1}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["start_time"], "2025-03-14T19:15:00");
    assert_eq!(body["item"]["end_time"], "2025-03-14T21:50:00");
    assert_eq!(body["item"]["group"], 20);

    let response = client()
        .post(format!("{}/api/cinemas/1/schedule/move", base))
        .bearer_auth(TOKEN)
        .json(&json!({"itemId": 999, "dragTime": "2025-03-14T19:22:10", "groupIndex": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn schedule_with_impossible_length_is_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/cinema/1/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "screenId": 10,
            "screenName": "Hall A",
            "schedules": [{
                "scheduleId": 100,
                "movieId": 1,
                "movieName": "Endless",
                "startDateTime": "2025-03-14T18:00:00",
                "movieLength": i64::MAX / 60
            }]
        }])))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .get(format!("{}/api/cinemas/1/schedule", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn movies_are_filtered_but_stats_cover_catalog() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Dune", "length": 155, "status": 1, "releaseDate": "2024-03-01"},
            {"id": 2, "name": "Avatar 3", "length": 190, "status": 0}
        ])))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let body: Value = client()
        .get(format!("{}/api/movies?filter=showing", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Dune");
    assert_eq!(movies[0]["status"], "Now Showing");
    assert_eq!(movies[0]["release"], 2024);
    assert_eq!(body["stats"], json!({"total": 2, "nowShowing": 1, "comingSoon": 1}));
}

#[tokio::test]
async fn concession_create_sends_normalized_payload() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/concession"))
        .and(body_json(json!({
            "name": "Date night",
            "description": "Popcorn for two",
            "imageBase64": "aGVsbG8=",
            "cinemaId": 1,
            "foods": [{"name": "Popcorn", "description": null, "price": 4.5}],
            "drinks": [{"name": "Cola", "description": null, "price": 2.0}],
            "comboPrice": 6.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/concessions", base))
        .bearer_auth(TOKEN)
        .json(&json!({
            "name": "Date night",
            "description": "Popcorn for two",
            "imageBase64": "data:image/png;base64,aGVsbG8=",
            "foods": [{"name": "Popcorn", "price": 4.5}],
            "drinks": [{"name": "Cola", "price": 2.0}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["concession"]["id"], 11);
}

#[tokio::test]
async fn concession_search_matches_items() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/concession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Family pack", "cinemaId": 2, "foods": [{"name": "Nachos", "price": 5.0}]},
            {"id": 2, "name": "Solo", "cinemaId": 2, "drinks": [{"name": "Cola", "price": 2.0}]}
        ])))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let body: Value = client()
        .get(format!("{}/api/concessions?search=nacho&cinemaId=2", base))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count"], 1);
    assert_eq!(body["concessions"][0]["id"], 1);
}

#[tokio::test]
async fn screen_update_maps_missing_screen() {
    let upstream = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/cinema/screen/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .put(format!("{}/api/screens/42", base))
        .bearer_auth(TOKEN)
        .json(&json!({"name": "Hall 42", "typeId": 1, "status": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Screen not found");

    let response = client()
        .put(format!("{}/api/screens/42", base))
        .bearer_auth(TOKEN)
        .json(&json!({"name": "", "typeId": 1, "status": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn screen_create_without_type_is_a_validation_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/cinema/1/screen"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let response = client()
        .post(format!("{}/api/cinemas/1/screens", base))
        .bearer_auth(TOKEN)
        .json(&json!({"name": "Hall 9", "status": 1}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("typeId is required"));
}
