use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::CoinResult;
use crate::fetcher::{fetch_info, CoinSource};
use crate::models::CoinDetail;
use crate::utils::cron::start_ticker_refresh;
use crate::utils::normalize_coin_id;

struct Session {
    coin_id: String,
    tasks: Vec<JoinHandle<()>>,
}

/// Keeps the info and ticker of one coin in sync with the remote source.
///
/// Mounting a coin starts two independent tasks: a one-shot info fetch and a
/// ticker refresh loop. Switching coins or unmounting aborts both and moves
/// the generation forward, so a result still in flight for the previous coin
/// can never land in the new view.
pub struct CoinDetailController<S: CoinSource + ?Sized> {
    source: Arc<S>,
    state: Arc<watch::Sender<CoinDetail>>,
    refresh_interval: Duration,
    generation: u64,
    session: Option<Session>,
}

impl<S> CoinDetailController<S>
where
    S: CoinSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, refresh_interval: Duration) -> Self {
        let (state, _) = watch::channel(CoinDetail::default());
        Self {
            source,
            state: Arc::new(state),
            refresh_interval,
            generation: 0,
            session: None,
        }
    }

    pub fn coin_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.coin_id.as_str())
    }

    /// Mounts `coin_id`. A no-op when that coin is already mounted.
    /// Must be called from within a tokio runtime.
    pub fn set_coin(&mut self, coin_id: &str) -> CoinResult<()> {
        let coin_id = normalize_coin_id(coin_id)?;
        if self.coin_id() == Some(coin_id.as_str()) {
            return Ok(());
        }
        self.stop_tasks();

        self.generation += 1;
        let generation = self.generation;
        self.state
            .send_replace(CoinDetail::pending(&coin_id, generation));
        info!("Mounted coin {} (generation {})", coin_id, generation);

        let info_task = {
            let source = self.source.clone();
            let state = self.state.clone();
            let coin_id = coin_id.clone();
            tokio::spawn(async move {
                fetch_info(source.as_ref(), &state, &coin_id, generation).await;
            })
        };
        let ticker_task = tokio::spawn(start_ticker_refresh(
            self.source.clone(),
            self.state.clone(),
            coin_id.clone(),
            generation,
            self.refresh_interval,
        ));

        self.session = Some(Session {
            coin_id,
            tasks: vec![info_task, ticker_task],
        });
        Ok(())
    }

    pub fn unmount(&mut self) {
        if let Some(coin_id) = self.coin_id() {
            info!("Unmounted coin {}", coin_id);
        }
        self.stop_tasks();
        self.generation += 1;
        self.state
            .send_replace(CoinDetail::unmounted(self.generation));
    }

    pub fn current(&self) -> CoinDetail {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CoinDetail> {
        self.state.subscribe()
    }
}

impl<S: CoinSource + ?Sized> CoinDetailController<S> {
    fn stop_tasks(&mut self) {
        if let Some(session) = self.session.take() {
            for task in session.tasks {
                task.abort();
            }
        }
    }
}

impl<S: CoinSource + ?Sized> Drop for CoinDetailController<S> {
    fn drop(&mut self) {
        self.stop_tasks();
    }
}
