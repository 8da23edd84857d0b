/*
 * Responsibility
 * - "content loaded" ライフサイクル (1 回だけ発火する)
 * - 発火時に listener へ RequestEvents を可変で渡し、購読を登録させる
 */
use super::types::RequestEvents;

type ContentLoadedFn = Box<dyn FnOnce(&mut RequestEvents) + Send>;

pub struct Page {
    events: RequestEvents,
    listeners: Vec<ContentLoadedFn>,
    loaded: bool,
}

impl Page {
    pub fn new() -> Self {
        Self {
            events: RequestEvents::new(),
            listeners: Vec::new(),
            loaded: false,
        }
    }

    pub fn on_content_loaded<F>(&mut self, listener: F)
    where
        F: FnOnce(&mut RequestEvents) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// listener を登録順に 1 回だけ呼ぶ。2 回目以降は何もせず false を返す。
    pub fn content_loaded(&mut self) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;

        for listener in self.listeners.drain(..) {
            listener(&mut self.events);
        }
        true
    }

    pub fn into_events(self) -> RequestEvents {
        self.events
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
