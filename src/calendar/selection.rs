/// Payload of a selection change. `index == None` means nothing is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged<T> {
    pub index: Option<usize>,
    pub item: Option<T>,
}

impl<T> SelectionChanged<T> {
    pub fn cleared() -> Self {
        Self { index: None, item: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&SelectionChanged<T>)>;

/// Selection-changed subscribers, called synchronously in subscription order
pub struct SelectionListeners<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T> Default for SelectionListeners<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> SelectionListeners<T> {
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionChanged<T>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &SelectionChanged<T>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
