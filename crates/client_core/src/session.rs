use std::sync::Arc;

use crate::{
    api::HrApi,
    reference::ReferenceData,
    resource::Resource,
    screen::{EntityScreen, Outcome, Request},
};

/// Runs one request against the API. Never fails: errors travel inside the
/// returned outcome.
pub async fn execute<R: Resource>(api: &dyn HrApi, request: Request<R>) -> Outcome<R> {
    match request {
        Request::Load {
            generation,
            reconcile,
        } => {
            let result = futures::try_join!(
                R::fetch_all(api),
                ReferenceData::fetch(api, R::REFERENCES)
            );
            Outcome::Loaded {
                generation,
                reconcile,
                result,
            }
        }
        Request::Create { generation, draft } => Outcome::Created {
            generation,
            result: R::create(api, &draft).await,
        },
        Request::Update {
            generation,
            id,
            draft,
        } => {
            let result = R::update(api, &id, &draft).await;
            Outcome::Updated {
                generation,
                id,
                result,
            }
        }
        Request::Delete { generation, id } => {
            let result = R::delete(api, &id).await;
            Outcome::Deleted {
                generation,
                id,
                result,
            }
        }
    }
}

/// A screen driven inline by an async caller: each operation runs its
/// request, applies the outcome and follows up with the reconciling reload.
pub struct ScreenSession<R: Resource> {
    api: Arc<dyn HrApi>,
    screen: EntityScreen<R>,
}

impl<R: Resource> ScreenSession<R> {
    pub fn new(api: Arc<dyn HrApi>, confirm_deletes: bool) -> Self {
        Self {
            api,
            screen: EntityScreen::new(confirm_deletes),
        }
    }

    pub fn screen(&self) -> &EntityScreen<R> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut EntityScreen<R> {
        &mut self.screen
    }

    pub async fn run(&mut self, request: Request<R>) {
        let mut next = Some(request);
        while let Some(request) = next.take() {
            let outcome = execute(self.api.as_ref(), request).await;
            next = self.screen.apply(outcome);
        }
    }

    pub async fn mount(&mut self) {
        let request = self.screen.mount();
        self.run(request).await;
    }

    pub async fn load_all(&mut self) {
        let request = self.screen.load_all();
        self.run(request).await;
    }

    /// False when validation blocked the submit.
    pub async fn submit(&mut self) -> bool {
        match self.screen.submit() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    pub async fn confirm_delete(&mut self) -> bool {
        match self.screen.confirm_delete() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Requests and immediately confirms a delete.
    pub async fn delete(&mut self, id: R::Id) {
        if let Some(request) = self.screen.request_delete(id) {
            self.run(request).await;
            return;
        }
        self.confirm_delete().await;
    }

    pub fn unmount(&mut self) {
        self.screen.unmount();
    }
}
