use std::collections::VecDeque;

/// Opaque ticket for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Something that can arrange for the next animation frame to be delivered.
pub trait FrameScheduler {
    fn schedule(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler backed by an in-memory queue. The host pulls due frames with
/// [`FrameQueue::take`] and hands them back to the backdrop.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameHandle>,
    scheduled: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.scheduled += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_delivered_in_order() {
        let mut queue = FrameQueue::new();
        let first = queue.schedule();
        let second = queue.schedule();

        assert_ne!(first, second);
        assert_eq!(queue.outstanding(), 2);
        assert_eq!(queue.take(), Some(first));
        assert_eq!(queue.take(), Some(second));
        assert_eq!(queue.take(), None);
        assert_eq!(queue.scheduled(), 2);
    }

    #[test]
    fn cancelled_handle_is_never_delivered() {
        let mut queue = FrameQueue::new();
        let handle = queue.schedule();
        queue.cancel(handle);
        queue.cancel(handle);

        assert!(queue.is_idle());
        assert_eq!(queue.cancelled(), 1);
        assert_eq!(queue.take(), None);
    }
}
