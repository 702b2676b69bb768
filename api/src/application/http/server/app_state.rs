use std::sync::Arc;

use staffdesk_core::application::StaffdeskService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: StaffdeskService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: StaffdeskService) -> Self {
        Self { args, service }
    }
}
