//! 비닐하우스 선택 변경 시 오래된 응답을 버리기 위한 요청 순번

use std::sync::atomic::{AtomicU64, Ordering};

/// 요청 발급 시점의 순번
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 단조 증가 순번 발급기
///
/// 선택이 바뀔 때마다 `issue`로 새 티켓을 받고, 응답 처리 전에
/// `is_current`로 확인한다.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 티켓 발급. 이전 티켓은 모두 무효가 된다
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// 선택 해제: 진행 중인 요청의 티켓을 모두 무효로 만든다
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    pub fn current(&self) -> Option<Ticket> {
        match self.current.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_invalidates_older() {
        let seq = RequestSequencer::new();
        assert_eq!(seq.current(), None);

        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
        assert_eq!(seq.current(), Some(second));
    }

    #[test]
    fn test_cleared_selection_rejects_in_flight_response() {
        let seq = RequestSequencer::new();
        let loading = seq.issue();

        // 하우스 삭제 등으로 선택이 없어짐
        seq.invalidate();
        assert!(!seq.is_current(loading));

        // 다음 선택의 티켓은 정상
        let next = seq.issue();
        assert!(seq.is_current(next));
        assert!(!seq.is_current(loading));
    }
}
