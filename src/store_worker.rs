use crate::logger;
use crate::models::{StoreRequest, StoreResponse};
use crate::store::QuestionStore;
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::thread;

/// Runs store calls off the UI thread, one at a time and in the order they
/// were sent, so two mutations of the same question never overlap.
pub fn spawn_store_worker<S>(
    store: S,
    requests: Receiver<StoreRequest>,
    responses: Sender<StoreResponse>,
) -> io::Result<thread::JoinHandle<()>>
where
    S: QuestionStore + 'static,
{
    thread::Builder::new()
        .name("quiz-terminal::store_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Store worker could not start a runtime: {}", e));
                    return;
                }
            };
            logger::log("Store worker started");

            for request in requests.iter() {
                let response = rt.block_on(execute(&store, request));
                if responses.send(response).is_err() {
                    break;
                }
            }
            logger::log("Store worker channel disconnected, exiting");
        })
}

pub async fn execute<S>(store: &S, request: StoreRequest) -> StoreResponse
where
    S: QuestionStore + ?Sized,
{
    logger::log(&format!("Store request: {}", describe(&request)));
    let response = match request {
        StoreRequest::Load => StoreResponse::Loaded(store.list().await),
        StoreRequest::Create { draft, question } => StoreResponse::Created {
            draft,
            result: store.create(&question).await,
        },
        StoreRequest::Update {
            id,
            draft,
            question,
        } => {
            let result = store.update(&id, &question).await;
            StoreResponse::Updated {
                id,
                draft,
                question,
                result,
            }
        }
        StoreRequest::Delete(id) => {
            let result = store.delete(&id).await;
            StoreResponse::Deleted { id, result }
        }
    };
    if let Some(err) = failure(&response) {
        logger::log(&format!("Store request failed: {}", err));
    }
    response
}

fn describe(request: &StoreRequest) -> String {
    match request {
        StoreRequest::Load => "GET /questions".to_string(),
        StoreRequest::Create { .. } => "POST /questions".to_string(),
        StoreRequest::Update { id, .. } => format!("PUT /questions/{}", id),
        StoreRequest::Delete(id) => format!("DELETE /questions/{}", id),
    }
}

fn failure(response: &StoreResponse) -> Option<&crate::error::StoreError> {
    match response {
        StoreResponse::Loaded(Err(e)) | StoreResponse::Created { result: Err(e), .. } => Some(e),
        StoreResponse::Updated { result: Err(e), .. } | StoreResponse::Deleted { result: Err(e), .. } => {
            Some(e)
        }
        _ => None,
    }
}
