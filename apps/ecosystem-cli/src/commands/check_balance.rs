use crate::error::CliResult;
use ecosystem_client::{BalanceReport, BalanceState, EcosystemClient};
use solana_sdk::pubkey::Pubkey;

pub async fn execute(
    client: &EcosystemClient,
    ecosystem_mint: &Pubkey,
    merchant: &Pubkey,
) -> CliResult<()> {
    println!("🔍 Checking merchant balance...");
    println!("   Ecosystem mint: {}", ecosystem_mint);
    println!("   Merchant: {}", merchant);

    let report = client.check_balance(ecosystem_mint, merchant).await?;
    for line in describe(&report) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(report: &BalanceReport) -> Vec<String> {
    let mut lines = vec![
        format!("   Ecosystem config: {}", report.ecosystem_config),
        format!("   Balance account: {}", report.address),
    ];

    match &report.state {
        BalanceState::Missing => lines.push("❌ Balance account does not exist".to_string()),
        BalanceState::Decoded {
            owner,
            data_len,
            balance,
        } => {
            lines.push(format!("   Owner: {}", owner));
            lines.push(format!("   Data length: {} bytes", data_len));
            lines.push(format!("✅ Merchant: {}", balance.merchant));
            lines.push(format!("   Balance: {}", balance.balance));
            lines.push(format!("   Ecosystem mint: {}", balance.ecosystem_mint));
        }
        BalanceState::Undecoded { owner, data } => {
            lines.push(format!("   Owner: {}", owner));
            lines.push(format!("⚠️  Account data too short ({} bytes)", data.len()));
            lines.push(format!("   Raw data: {}", hex::encode(data)));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecoded_data_is_hex() {
        let report = BalanceReport {
            address: Pubkey::new_unique(),
            ecosystem_config: Pubkey::new_unique(),
            state: BalanceState::Undecoded {
                owner: Pubkey::new_unique(),
                data: vec![0xde, 0xad, 0xbe, 0xef],
            },
        };

        let lines = describe(&report);
        assert!(lines.iter().any(|line| line.contains("4 bytes")));
        assert_eq!(lines.last().unwrap(), "   Raw data: deadbeef");
    }
}
