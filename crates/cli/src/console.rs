use artist_token::core::abi::{format_value, DynSolValue};
use artist_token_core::{
    ActionObserver, ActionRequest, DappError, Receipt, RefreshEntry, Session,
};

/// Observer that reports action completions on the console.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl ActionObserver for ConsoleObserver {
    fn on_confirmed(&self, request: &ActionRequest, receipt: &Receipt) {
        println!(
            "Artist {} has successfully been created (tx {})",
            request.name, receipt.transaction_hash
        );
    }

    fn on_failed(&self, request: &ActionRequest, error: &DappError) {
        eprintln!("Registration of {} failed: {}", request.name, error);
    }

    fn on_redeemed(&self, notice: &str) {
        println!("{}", notice);
    }
}

pub fn format_session(session: &Session) -> String {
    format!(
        "account:  {}\nnetwork:  {}\ncontract: {}",
        session.active_account(),
        session.network_id(),
        session.contract().address()
    )
}

pub fn format_entry(entry: &RefreshEntry) -> String {
    match &entry.result {
        Ok(values) => format!("{:>4}  {}", entry.index, join_values(values)),
        Err(err) => format!("{:>4}  <lookup failed: {}>", entry.index, err),
    }
}

fn join_values(values: &[DynSolValue]) -> String {
    values
        .iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use artist_token::core::abi::EvmAddress;

    #[test]
    fn test_format_entry_ok() {
        let entry = RefreshEntry {
            index: 3,
            result: Ok(vec![DynSolValue::Address(EvmAddress::from([0xaa; 20]))]),
        };
        assert_eq!(
            format_entry(&entry),
            "   3  0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        );
    }

    #[test]
    fn test_format_entry_failed() {
        let entry = RefreshEntry {
            index: 12,
            result: Err(DappError::Transport("connection reset".to_string())),
        };
        let line = format_entry(&entry);
        assert!(line.starts_with("  12  <lookup failed:"));
        assert!(line.contains("connection reset"));
    }
}
