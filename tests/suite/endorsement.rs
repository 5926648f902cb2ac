use std::time::Duration;

use awaken_engine::runtime::{Command, Runtime};
use awaken_engine::{
    AudioController, EndorsementOverlay, HttpEndorsementClient, Profile, SessionEvent,
    SessionSettings, SubjectId, ToastLevel,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::RecordingAudio;

const WAIT: Duration = Duration::from_secs(5);

async fn endorsement_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/endorsements/rust"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn start(
    server: &MockServer,
) -> (
    mpsc::Sender<Command>,
    mpsc::UnboundedReceiver<SessionEvent>,
    JoinHandle<AudioController<RecordingAudio>>,
) {
    let client = HttpEndorsementClient::new(&server.uri(), WAIT).unwrap();
    let profile = Profile {
        endorsements: vec![(SubjectId::new("rust"), 10)],
        ..Profile::default()
    };
    let runtime = Runtime::start(
        SessionSettings::default(),
        profile,
        RecordingAudio::default(),
        client,
    )
    .unwrap();
    let (commands, rx) = mpsc::channel(8);
    let (tx, events) = mpsc::unbounded_channel();
    let task = tokio::spawn(runtime.run(rx, tx));
    (commands, events, task)
}

async fn next_matching<T>(
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    mut pick: impl FnMut(SessionEvent) -> Option<T>,
) -> T {
    loop {
        let event = timeout(WAIT, events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event stream closed");
        if let Some(found) = pick(event) {
            return found;
        }
    }
}

fn overlay(event: SessionEvent) -> Option<EndorsementOverlay> {
    match event {
        SessionEvent::Endorsement { overlay, .. } => Some(overlay),
        _ => None,
    }
}

#[tokio::test]
async fn server_error_rolls_back_after_one_request() {
    let server = endorsement_server(500).await;
    let (commands, mut events, task) = start(&server);

    let rust = SubjectId::new("rust");
    commands.send(Command::Endorse(rust.clone())).await.unwrap();
    commands.send(Command::Endorse(rust)).await.unwrap();

    let optimistic = next_matching(&mut events, overlay).await;
    assert_eq!(
        optimistic,
        EndorsementOverlay {
            count: 11,
            endorsed: true
        }
    );
    let restored = next_matching(&mut events, overlay).await;
    assert_eq!(
        restored,
        EndorsementOverlay {
            count: 10,
            endorsed: false
        }
    );

    drop(commands);
    let audio = task.await.unwrap();
    assert_eq!(audio.active_loops(), 0);
}

#[tokio::test]
async fn accepted_endorsement_keeps_count_and_toasts() {
    let server = endorsement_server(201).await;
    let (commands, mut events, task) = start(&server);

    commands
        .send(Command::Endorse(SubjectId::new("rust")))
        .await
        .unwrap();
    assert_eq!(next_matching(&mut events, overlay).await.count, 11);

    let (message, level) = next_matching(&mut events, |event| match event {
        SessionEvent::ToastShown { message, level } => Some((message, level)),
        _ => None,
    })
    .await;
    assert_eq!(message, "Endorsed rust.");
    assert_eq!(level, ToastLevel::Success);

    drop(commands);
    task.await.unwrap();
}
