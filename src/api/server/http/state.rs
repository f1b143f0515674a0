use crate::api::server::HttpServer;
use crate::storage::GraphDatabase;
use std::sync::Arc;

pub struct AppState<G: GraphDatabase + ?Sized + 'static> {
    pub server: Arc<HttpServer<G>>,
}

impl<G: GraphDatabase + ?Sized + 'static> AppState<G> {
    pub fn new(server: Arc<HttpServer<G>>) -> Self {
        Self { server }
    }
}

// 手写 Clone，避免 derive 要求 G: Clone
impl<G: GraphDatabase + ?Sized + 'static> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            server: Arc::clone(&self.server),
        }
    }
}
