use clinic_calendar::components::calendar_service::{CreateEventRequest, UpdateEventRequest};
use clinic_calendar::components::{CalendarApiClient, CalendarService};
use clinic_calendar::error::Error;
use mockito::{Matcher, Server};

fn client(server: &Server) -> CalendarApiClient {
    CalendarApiClient::new(&server.url(), "secret-key").unwrap()
}

#[tokio::test]
async fn test_list_events_nested_response() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/event/list")
        .match_header("x-api-key", "secret-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("calendar_id".into(), "doctor-1".into()),
            Matcher::UrlEncoded("upcoming_only".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "data": {
                    "data": {
                        "events": [
                            {
                                "event_id": "evt-1",
                                "summary": "Checkup",
                                "start": { "dateTime": "2024-03-15T09:00:00+02:00" },
                                "end": { "dateTime": "2024-03-15T09:30:00+02:00" },
                                "attendees": [{ "email": "patient@example.com" }]
                            }
                        ],
                        "total_count": 1,
                        "source": "google",
                        "calendar_id": "doctor-1"
                    }
                }
            }"#,
        )
        .create_async()
        .await;

    let list = client(&server).list_events("doctor-1", true).await.unwrap();

    mock.assert_async().await;
    assert_eq!(list.events.len(), 1);
    assert_eq!(list.events[0].id, "evt-1");
    assert_eq!(list.events[0].attendee_count(), 1);
    assert_eq!(list.source, "google");
}

#[tokio::test]
async fn test_list_events_error_detail() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/event/list")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Calendar not found"}"#)
        .create_async()
        .await;

    let err = client(&server).list_events("missing", false).await.unwrap_err();

    mock.assert_async().await;
    match err {
        Error::CalendarApi(message) => assert_eq!(message, "Calendar not found"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_body_uses_status() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/event/list")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = client(&server).list_events("doctor-1", true).await.unwrap_err();
    assert!(err.to_string().contains("HTTP error! status: 500"));
}

#[tokio::test]
async fn test_create_event_posts_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/event/create")
        .match_header("x-api-key", "secret-key")
        .match_body(Matcher::PartialJsonString(
            r#"{"calendar_id": "doctor-1", "summary": "Follow-up"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "data": {
                    "event_id": "evt-9",
                    "summary": "Follow-up",
                    "start": { "dateTime": "2024-03-18T10:00:00" },
                    "end": { "dateTime": "2024-03-18T10:30:00" }
                }
            }"#,
        )
        .create_async()
        .await;

    let request = CreateEventRequest {
        calendar_id: "doctor-1".to_string(),
        summary: "Follow-up".to_string(),
        start: "2024-03-18T10:00:00".to_string(),
        end: "2024-03-18T10:30:00".to_string(),
        attendee_email: None,
    };
    let event = client(&server).create_event(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(event.id, "evt-9");
    assert_eq!(event.time_range(), "10:00 - 10:30");
}

#[tokio::test]
async fn test_update_event_rejects_missing_fields_without_request() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", "/event/update")
        .expect(0)
        .create_async()
        .await;

    let request = UpdateEventRequest {
        calendar_id: "doctor-1".to_string(),
        event_id: String::new(),
        summary: "Follow-up".to_string(),
        start: "2024-03-18T10:00:00".to_string(),
        end: String::new(),
    };
    let err = client(&server).update_event(&request).await.unwrap_err();

    mock.assert_async().await;
    assert!(err.to_string().contains("event_id, end"));
}

#[tokio::test]
async fn test_delete_event() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("DELETE", "/event/delete")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("calendar_id".into(), "doctor-1".into()),
            Matcher::UrlEncoded("event_id".into(), "evt-1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "deleted", "google_calendar_id": "g-123"}"#)
        .create_async()
        .await;

    let response = client(&server).delete_event("doctor-1", "evt-1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, "deleted");
    assert_eq!(response.google_calendar_id, "g-123");
}

#[test]
fn test_invalid_base_url() {
    assert!(CalendarApiClient::new("not a url", "key").is_err());
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    // Nothing listens on port 1
    let client = CalendarApiClient::new("http://127.0.0.1:1", "secret-key").unwrap();
    let err = client.list_events("doctor-1", true).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_malformed_success_body_is_http_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/event/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client(&server).list_events("doctor-1", true).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_list_events_prefers_backend_event_id() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/event/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"events": [{
                "id": "google-abc",
                "event_id": "backend-42",
                "summary": "Checkup",
                "start": { "dateTime": "2024-03-15T09:00:00" },
                "end": { "dateTime": "2024-03-15T09:30:00" }
            }]}"#,
        )
        .create_async()
        .await;

    let list = client(&server).list_events("doctor-1", true).await.unwrap();
    assert_eq!(list.events[0].id, "backend-42");
}
