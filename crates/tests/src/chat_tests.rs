use crate::fixtures::audio::{silent_wav, tone_wav};
use crate::fixtures::fakes::{FAKE_MP3, FakeCompletion};
use crate::fixtures::test_app::{ASSISTANT_REPLY, HEARD_TEXT, TestApp, TestBackends};
use parole_services::transport;
use reqwest::multipart;
use serde_json::{Value, json};

fn looks_like_mp3(bytes: &[u8]) -> bool {
    bytes.starts_with(b"ID3") || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
}

fn audio_part(bytes: Vec<u8>) -> multipart::Part {
    multipart::Part::bytes(bytes)
        .file_name("question.wav")
        .mime_str("audio/wav")
        .unwrap()
}

#[tokio::test]
async fn chat_text_bonjour_returns_reply_and_speech() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .json(&json!({
            "user_id": "u1",
            "pre_prompt": "Tu es un mentor bienveillant.",
            "message": "Bonjour",
            "history": []
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["texte_utilisateur"], "Bonjour");
    assert_eq!(body["reponse_assistant"], ASSISTANT_REPLY);
    assert!(body.get("audio_utilisateur_base64").is_none());

    let speech = transport::decode(body["tts_audio_base64"].as_str().unwrap()).unwrap();
    assert!(looks_like_mp3(&speech));
}

#[tokio::test]
async fn chat_text_sends_only_last_five_history_entries() {
    let app = TestApp::spawn().await;
    let history: Vec<String> = (1..=7).map(|i| format!("h{}", i)).collect();

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .json(&json!({
            "user_id": "u1",
            "pre_prompt": "Sois bref.",
            "message": "Et ensuite ?",
            "history": history
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let prompts = app.completion.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        "Sois bref. Historique récent:\nh3\nh4\nh5\nh6\nh7\n\nUtilisateur: Et ensuite ?\nMentor:"
    );
}

#[tokio::test]
async fn chat_text_voice_follows_reply_language() {
    let app = TestApp::spawn().await;

    app.client
        .post(app.url("/chat_text/"))
        .json(&json!({ "user_id": "u1", "pre_prompt": "", "message": "Bonjour", "history": [] }))
        .send()
        .await
        .unwrap();

    let calls = app.speech.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "fr");
    assert_eq!(calls[0].0, ASSISTANT_REPLY);
}

#[tokio::test]
async fn chat_text_missing_message_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .json(&json!({ "user_id": "u1", "pre_prompt": "", "history": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
    assert!(app.completion.prompts().is_empty());
}

#[tokio::test]
async fn chat_text_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn chat_text_completion_failure_is_internal_error() {
    let app = TestApp::spawn_with(TestBackends {
        completion: FakeCompletion::failing("rate limit exceeded"),
        ..Default::default()
    })
    .await;

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .json(&json!({ "user_id": "u1", "pre_prompt": "", "message": "Bonjour", "history": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "internal");
    assert!(body["message"].as_str().unwrap().contains("rate limit exceeded"));
    assert!(app.speech.calls().is_empty());
}

#[tokio::test]
async fn chat_text_synthesis_failure_still_answers() {
    let app = TestApp::spawn_with(TestBackends {
        speech_fails: true,
        ..Default::default()
    })
    .await;

    let resp = app
        .client
        .post(app.url("/chat_text/"))
        .json(&json!({ "user_id": "u1", "pre_prompt": "", "message": "Bonjour", "history": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["reponse_assistant"], ASSISTANT_REPLY);
    let speech = transport::decode(body["tts_audio_base64"].as_str().unwrap()).unwrap();
    assert!(speech.is_empty());
}

#[tokio::test]
async fn chat_audio_transcribes_and_echoes_upload() {
    let app = TestApp::spawn().await;
    let upload = tone_wav(44100, 2, 0.5);

    let form = multipart::Form::new()
        .part("file", audio_part(upload.clone()))
        .text("user_id", "u2")
        .text("pre_prompt", "Tu es un guide.")
        .text("history", r#"["Salut", "Ça va ?"]"#);

    let resp = app
        .client
        .post(app.url("/chat_audio/"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["texte_utilisateur"], HEARD_TEXT);
    assert_eq!(body["reponse_assistant"], ASSISTANT_REPLY);

    let echoed = transport::decode(body["audio_utilisateur_base64"].as_str().unwrap()).unwrap();
    assert_eq!(echoed, upload);
    let speech = transport::decode(body["tts_audio_base64"].as_str().unwrap()).unwrap();
    assert_eq!(speech, FAKE_MP3);

    let prompts = app.completion.prompts();
    assert_eq!(
        prompts[0],
        format!("Tu es un guide. Historique récent:\nSalut\nÇa va ?\n\nUtilisateur: {}\nMentor:", HEARD_TEXT)
    );
}

#[tokio::test]
async fn chat_audio_accepts_repeated_history_fields() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new()
        .part("file", audio_part(tone_wav(16000, 1, 0.3)))
        .text("user_id", "u2")
        .text("pre_prompt", "P")
        .text("history", "premier")
        .text("history", "second");

    let resp = app
        .client
        .post(app.url("/chat_audio/"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert!(app.completion.prompts()[0].starts_with("P Historique récent:\npremier\nsecond\n\n"));
}

#[tokio::test]
async fn chat_audio_silence_is_bad_request() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new()
        .part("file", audio_part(silent_wav(16000, 0.5)))
        .text("user_id", "u2");

    let resp = app
        .client
        .post(app.url("/chat_audio/"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Impossible de comprendre l'audio");
    assert!(app.completion.prompts().is_empty());
}

#[tokio::test]
async fn chat_audio_without_file_is_bad_request() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new().text("user_id", "u2");
    let resp = app
        .client
        .post(app.url("/chat_audio/"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
}
