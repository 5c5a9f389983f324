// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tokio::sync::watch;

use horae_store::EntityServices;

use crate::node::MasterState;

pub struct AppState<S, M> {
    pub services: Arc<EntityServices<S, M>>,
    pub master: watch::Receiver<MasterState>,
}

impl<S, M> Clone for AppState<S, M> {
    fn clone(&self) -> Self {
        Self { services: self.services.clone(), master: self.master.clone() }
    }
}
