//! Integration tests for the conversation core.
//!
//! These drive the full chat service over the mock model: the stage
//! machine across a conversation, profile learning, prompt content, and
//! the fallback path when the model backend is down.

use std::sync::Arc;

use pet_pal::adapters::ai::MockChatModel;
use pet_pal::application::ChatService;
use pet_pal::ports::ModelError;

fn service_over(model: &MockChatModel) -> ChatService {
    ChatService::new(Arc::new(model.clone()))
}

// =============================================================================
// Stage machine across a conversation
// =============================================================================

#[tokio::test]
async fn stage_sequence_for_a_nameless_conversation() {
    let model = MockChatModel::new();
    let service = service_over(&model);

    // No name cues, no pet words: only the turn counter drives the stages.
    let expected = [
        "getting_name",     // prior turns: 0
        "getting_name",     // 1
        "getting_name",     // 2
        "building_rapport", // 3
        "building_rapport", // 4
        "interactive_mode", // 5
        "story_mode",       // 6
        "interactive_mode", // 7
    ];

    for (turn, want) in expected.iter().enumerate() {
        service.chat("hello there friend", "stages").await;
        let stats = service.session_stats("stages").await.unwrap();
        assert_eq!(stats.stage.as_str(), *want, "turn {}", turn + 1);
        assert_eq!(stats.messages_count, turn as u32 + 1);
    }
}

#[tokio::test]
async fn known_name_goes_straight_to_rapport() {
    let model = MockChatModel::new();
    let service = service_over(&model);

    service.chat("My name is Sarah", "named").await;
    service.chat("nice to meet you", "named").await;

    let stats = service.session_stats("named").await.unwrap();
    // Second turn: name already known, so rapport instead of name-getting.
    assert_eq!(stats.stage.as_str(), "building_rapport");
    assert_eq!(stats.user_name.as_deref(), Some("Sarah"));
}

// =============================================================================
// Profile learning feeds the prompt
// =============================================================================

#[tokio::test]
async fn story_turn_embeds_a_preference_matched_story() {
    let model = MockChatModel::new();
    let service = service_over(&model);
    let session = "story-flow";

    service.chat("Hi, I'm Sarah and I love dogs!", session).await;
    for _ in 0..5 {
        service.chat("tell me more", session).await;
    }
    // Seventh turn evaluates six prior turns: story time.
    service.chat("go on", session).await;

    let stats = service.session_stats(session).await.unwrap();
    assert_eq!(stats.stage.as_str(), "story_mode");
    assert_eq!(stats.user_name.as_deref(), Some("Sarah"));
    assert_eq!(stats.pet_preference.as_str(), "dogs");
    assert_eq!(stats.stories_heard, 1);

    let request = model.last_request().unwrap();
    let prompt = request.system_prompt.unwrap();
    assert!(prompt.contains("Share this pet story naturally:"));
    assert!(prompt.contains("User's name: Sarah"));
    assert!(prompt.contains("Pet preference: dogs"));
}

#[tokio::test]
async fn compliment_turn_records_the_compliment() {
    let model = MockChatModel::new();
    let service = service_over(&model);
    let session = "compliment-flow";

    // Name on turn one so the counter alone drives stages; nine turns in
    // total puts the final turn at eight prior turns, a compliment turn.
    service.chat("call me Alex please", session).await;
    for _ in 0..7 {
        service.chat("this is lovely", session).await;
    }
    service.chat("keep going", session).await;

    let stats = service.session_stats(session).await.unwrap();
    assert_eq!(stats.stage.as_str(), "compliment_mode");
    assert_eq!(stats.compliments_received, 1);

    let prompt = model.last_request().unwrap().system_prompt.unwrap();
    assert!(prompt.contains("Include this compliment naturally:"));
}

// =============================================================================
// Fallback path
// =============================================================================

#[tokio::test]
async fn chat_never_fails_even_when_the_model_always_does() {
    let model = MockChatModel::failing(ModelError::Timeout { timeout_secs: 30 });
    let service = service_over(&model);

    for turn in 1..=10u32 {
        let reply = service.chat("hello there", "doomed").await;
        assert!(!reply.is_empty(), "turn {turn} produced an empty reply");

        let stats = service.session_stats("doomed").await.unwrap();
        assert_eq!(stats.messages_count, turn);
    }
}

#[tokio::test]
async fn fallback_replies_rotate_and_carry_the_name() {
    let model = MockChatModel::failing(ModelError::unavailable("maintenance"));
    let service = service_over(&model);

    let first = service.chat("I'm Sarah", "fallback").await;
    let second = service.chat("still there?", "fallback").await;

    assert!(first.starts_with("Sarah, "));
    assert!(second.starts_with("Sarah, "));
    assert_ne!(first, second);
}

#[tokio::test]
async fn recovery_after_a_single_failure() {
    let model = MockChatModel::new()
        .with_error(ModelError::rate_limited(5))
        .with_reply("I'm back! 🐾");
    let service = service_over(&model);

    let fallback = service.chat("hello", "flaky").await;
    let recovered = service.chat("hello again", "flaky").await;

    assert!(!fallback.is_empty());
    assert_eq!(recovered, "I'm back! 🐾");

    // Both turns counted, failed or not.
    let stats = service.session_stats("flaky").await.unwrap();
    assert_eq!(stats.messages_count, 2);
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[tokio::test]
async fn cleanup_then_stats_absent() {
    let model = MockChatModel::new();
    let service = service_over(&model);

    service.chat("hello", "tidy").await;
    assert!(service.cleanup_session("tidy").await);
    assert!(service.session_stats("tidy").await.is_none());
    assert!(!service.cleanup_session("tidy").await);
    assert!(!service.cleanup_session("never-was").await);
}

#[tokio::test]
async fn list_sessions_reports_each_conversation() {
    let model = MockChatModel::new();
    let service = service_over(&model);

    service.chat("hello", "one").await;
    service.chat("hello", "two").await;
    service.chat("hello again", "two").await;

    let mut sessions = service.list_sessions().await;
    sessions.sort_by(|a, b| a.session_id.cmp(&b.session_id));

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session_id, "one");
    assert_eq!(sessions[0].messages_count, 1);
    assert_eq!(sessions[1].session_id, "two");
    assert_eq!(sessions[1].messages_count, 2);
}

#[tokio::test]
async fn concurrent_turns_for_one_session_all_count() {
    let model = MockChatModel::new();
    let service = Arc::new(service_over(&model));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.chat("hello there", "contended").await
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = service.session_stats("contended").await.unwrap();
    assert_eq!(stats.messages_count, 8);
}
