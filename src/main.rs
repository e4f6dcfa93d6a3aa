use exchange_math::{
    propose_deposit, propose_withdrawal, quote_with_config, ErrorCode, Ledger, LedgerInstruction,
    MemoryLedger, PoolConfig,
};

fn main() -> Result<(), ErrorCode> {
    // Walk a pool through its lifecycle against the in-memory ledger
    let mut ledger = MemoryLedger::new(PoolConfig::default())?;

    // Example 1: First deposit sets the price
    let snapshot = ledger.read_reserves()?;
    let bootstrap = propose_deposit(1000, 2000, &snapshot)?;
    let receipt = ledger.submit(&LedgerInstruction::Deposit(bootstrap))?;
    println!(
        "Bootstrap: {} LP tokens minted for {} base and {} paired",
        receipt.lp_amount, receipt.base_amount, receipt.paired_amount
    );

    // Example 2: Later deposits follow the pool ratio
    let snapshot = ledger.read_reserves()?;
    let deposit = propose_deposit(100, 500, &snapshot)?;
    let receipt = ledger.submit(&LedgerInstruction::Deposit(deposit))?;
    println!(
        "Deposit: {} LP tokens minted for {} base and {} paired",
        receipt.lp_amount, receipt.base_amount, receipt.paired_amount
    );

    // Example 3: Quote and execute a swap
    let snapshot = ledger.read_reserves()?;
    let quote = quote_with_config(100, true, &snapshot, ledger.config())?;
    println!("Quote: {} base in -> {} paired out", quote.amount_in, quote.amount_out);
    ledger.submit(&LedgerInstruction::Swap(quote))?;

    // Example 4: A quote taken before someone else trades goes stale
    let snapshot = ledger.read_reserves()?;
    let stale = quote_with_config(100, false, &snapshot, ledger.config())?;
    let front_run = quote_with_config(500, false, &snapshot, ledger.config())?;
    ledger.submit(&LedgerInstruction::Swap(front_run))?;
    match ledger.submit(&LedgerInstruction::Swap(stale)) {
        Err(ErrorCode::StaleProposal) => println!("Stale quote rejected, re-quote required"),
        other => println!("Unexpected result for stale quote: {:?}", other),
    }

    // Example 5: Withdraw liquidity
    let snapshot = ledger.read_reserves()?;
    let withdrawal = propose_withdrawal(100, &snapshot)?;
    let receipt = ledger.submit(&LedgerInstruction::Withdraw(withdrawal))?;
    println!(
        "Withdraw: {} LP tokens -> {} base and {} paired",
        receipt.lp_amount, receipt.base_amount, receipt.paired_amount
    );
    println!("Final reserves: {:?}", ledger.read_reserves()?);

    Ok(())
}
