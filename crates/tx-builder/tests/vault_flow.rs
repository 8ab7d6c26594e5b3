//! End-to-end walk through a vault deposit: peg-in creation, template
//! parsing, funding, and payout PSBT construction.

use bitcoin::{
    absolute::LockTime, consensus, hashes::Hash, key::TweakedPublicKey, transaction::Version,
    Amount, Network, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness,
};
use tbv_primitives::{
    engine::{PeginSpec, ScriptEngine},
    wire,
};
use tbv_test_utils::{p2tr_utxo, test_role_keys, xonly_from_secret, TestScriptEngine};
use tbv_tx_builder::{
    build_payout_psbt, create_pegin_transaction, fund_template, parse_unfunded_template_hex,
    select_utxos,
};

#[test]
fn deposit_flow_from_pegin_to_payout_psbt() {
    let keys = test_role_keys();
    let depositor = *keys.depositor();
    let engine = TestScriptEngine;

    // 1. The engine hands back an unfunded peg-in.
    let artifacts = create_pegin_transaction(
        &engine,
        &PeginSpec {
            keys: keys.clone(),
            amount: Amount::from_sat(1_000_000),
            network: Network::Regtest,
        },
    )
    .unwrap();
    assert!(artifacts.tx.input.is_empty());

    // 2. Its wire form parses back as a template.
    let template_hex = wire::tx_to_hex(&artifacts.tx);
    let template = parse_unfunded_template_hex(&template_hex).unwrap();
    assert_eq!(template.outputs[0].script_pubkey, artifacts.vault_script_pubkey);
    assert_eq!(template.outputs[0].value, artifacts.vault_value);

    // 3. Wallet UTXOs cover the vault amount plus fees.
    let wallet = vec![
        p2tr_utxo(1, 400_000, depositor),
        p2tr_utxo(2, 900_000, depositor),
        p2tr_utxo(3, 250_000, depositor),
    ];
    let selection = select_utxos(&wallet, Amount::from_sat(1_000_000), 3).unwrap();
    assert!(selection.total_value >= Amount::from_sat(1_000_000) + selection.fee);

    // 4. Funding keeps the vault output at index 0 and appends change.
    let change_script = ScriptBuf::new_p2tr_tweaked(TweakedPublicKey::dangerous_assume_tweaked(
        xonly_from_secret([0x77; 32]),
    ));
    let funded = fund_template(
        &template,
        &selection.utxos,
        change_script.clone(),
        selection.change_amount,
    );
    assert_eq!(funded.input.len(), selection.utxos.len());
    assert_eq!(funded.output[0].script_pubkey, artifacts.vault_script_pubkey);
    let funded_txid = funded.compute_txid();

    // Funded round-trips through the consensus codec.
    let decoded: Transaction = consensus::deserialize(&consensus::serialize(&funded)).unwrap();
    assert_eq!(decoded.compute_txid(), funded_txid);

    // 5. A payout spending the vault output gets a signing PSBT with the
    // script-path data on input 0.
    let assert_tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint {
                txid: Txid::from_byte_array([0x55; 32]),
                vout: 0,
            },
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(30_000),
            script_pubkey: change_script.clone(),
        }],
    };
    let payout = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![
            TxIn {
                previous_output: OutPoint {
                    txid: funded_txid,
                    vout: 0,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                witness: Witness::new(),
            },
            TxIn {
                previous_output: OutPoint {
                    txid: assert_tx.compute_txid(),
                    vout: 0,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                witness: Witness::new(),
            },
        ],
        output: vec![TxOut {
            value: Amount::from_sat(1_020_000),
            script_pubkey: change_script,
        }],
    };

    let psbt = build_payout_psbt(
        &engine,
        &keys,
        Network::Regtest,
        &payout,
        &funded,
        &assert_tx,
    )
    .unwrap();

    let leaf = engine.create_payout_script(&keys, Network::Regtest).unwrap();
    assert_eq!(
        psbt.inputs[0].witness_utxo.as_ref().unwrap().script_pubkey,
        artifacts.vault_script_pubkey
    );
    assert_eq!(psbt.inputs[0].tap_internal_key, Some(leaf.internal_key));
    assert_eq!(psbt.inputs[0].tap_scripts.len(), 1);
    assert_eq!(
        psbt.inputs[1].witness_utxo.as_ref().unwrap(),
        &assert_tx.output[0]
    );

    // The PSBT survives its own wire form.
    let rehydrated = wire::psbt_from_hex(&wire::psbt_to_hex(&psbt)).unwrap();
    assert_eq!(rehydrated.unsigned_tx.compute_txid(), payout.compute_txid());
}
