mod decode_failure;
mod model_unavailable;
mod walking_skeleton;

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use student_type_core::ClassifierState;
use student_type_web::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Artifacts shared with the core crate's integration tests.
pub fn core_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("core")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A running service on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(classifier: ClassifierState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            student_type_web::serve(listener, AppState::new(classifier), async {
                let _ = rx.await;
            })
            .await
            .expect("serve");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle,
        }
    }

    pub async fn with_artifacts(model: &Path, encoder: &Path) -> Self {
        Self::start(ClassifierState::load(model, encoder)).await
    }

    pub async fn with_fixture_model() -> Self {
        Self::with_artifacts(
            &core_fixture("student_model.json"),
            &core_fixture("label_encoder.json"),
        )
        .await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("server task");
    }
}
