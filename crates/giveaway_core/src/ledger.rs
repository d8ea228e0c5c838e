/// Spendable points for the acting account.
///
/// The balance is replaced wholesale on every refresh and only ever moves
/// down through [`PointsLedger::spend`], which refuses to go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointsLedger {
    balance: u32,
}

impl PointsLedger {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.balance
    }

    pub fn has_minimum(&self, threshold: u32) -> bool {
        self.balance >= threshold
    }

    /// Deducts a confirmed entry's cost. Returns `false` and leaves the
    /// balance untouched when the cost is not affordable.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.balance.checked_sub(cost) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }

    pub fn refresh(&mut self, balance: u32) {
        self.balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_never_goes_negative() {
        let mut ledger = PointsLedger::new(100);
        for cost in [30, 50, 40, 20, 0, 5] {
            let affordable = ledger.can_afford(cost);
            assert_eq!(ledger.spend(cost), affordable);
        }
        assert_eq!(ledger.balance(), 0);
        assert!(!ledger.spend(1));
    }

    #[test]
    fn minimum_is_inclusive() {
        let ledger = PointsLedger::new(100);
        assert!(ledger.has_minimum(100));
        assert!(!ledger.has_minimum(101));
    }

    #[test]
    fn refresh_replaces_balance() {
        let mut ledger = PointsLedger::new(10);
        ledger.refresh(400);
        assert_eq!(ledger.balance(), 400);
        assert!(ledger.can_afford(400));
    }
}
