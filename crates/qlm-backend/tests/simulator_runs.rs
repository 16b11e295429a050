//! Backend runs against the local simulator.

use std::f64::consts::PI;
use std::sync::Arc;

use qlm_adapter_sim::SimulatorEngine;
use qlm_backend::{
    BackendConfig, BackendError, BackendWarning, ClassicalRegister, ExecutionBackend,
    PauliZProduct, PauliZProductInput,
};
use qlm_ir::{Circuit, Operation};
use rustc_hash::FxHashMap;

fn backend(number_qubits: usize, shots: u32, job_type: &str) -> ExecutionBackend {
    let config = BackendConfig {
        number_qubits,
        number_measurements: shots,
        job_type: job_type.to_string(),
        ..BackendConfig::default()
    };
    ExecutionBackend::new(config, Arc::new(SimulatorEngine::with_seed(11))).unwrap()
}

fn measure_all(circuit: &mut Circuit, register: &str, number_qubits: usize) {
    for q in 0..number_qubits {
        *circuit += Operation::measure_qubit(q, register, q);
    }
}

#[tokio::test]
async fn sample_run_repeats_deterministic_state() {
    let mut circuit = Circuit::new();
    circuit += Operation::definition_bit("ro", 2, true);
    circuit += Operation::RotateZ {
        qubit: 0,
        theta: 0.0.into(),
    };
    circuit += Operation::PauliX { qubit: 1 };
    measure_all(&mut circuit, "ro", 2);

    let out = backend(2, 5, "SAMPLE").run_circuit(&circuit).await.unwrap();
    assert_eq!(out.bits["ro"], vec![vec![false, true]; 5]);
    assert!(out.floats.is_empty());
    assert!(out.complexes.is_empty());
}

#[tokio::test]
async fn identity_padding_does_not_change_outcomes() {
    let mut circuit = Circuit::new();
    circuit += Operation::definition_bit("ro", 3, true);
    circuit += Operation::PauliX { qubit: 2 };
    circuit += Operation::CNOT {
        control: 2,
        target: 0,
    };
    measure_all(&mut circuit, "ro", 3);

    let config = BackendConfig {
        number_qubits: 3,
        number_measurements: 3,
        apply_identity_to_idle: true,
        ..BackendConfig::default()
    };
    let backend = ExecutionBackend::new(config, Arc::new(SimulatorEngine::new())).unwrap();
    assert_eq!(backend.translate(&circuit).unwrap().count_opcode("I"), 3);

    let out = backend.run_circuit(&circuit).await.unwrap();
    assert_eq!(out.bits["ro"], vec![vec![true, false, true]; 3]);
}

#[tokio::test]
async fn obs_without_observable_uses_z_on_all_qubits() {
    let backend = backend(2, 100, "OBS");
    assert_eq!(backend.warnings(), &[BackendWarning::DefaultObservable]);

    let mut circuit = Circuit::new();
    circuit += Operation::definition_float("zz", 1, true);
    circuit += Operation::PauliX { qubit: 1 };

    let out = backend.run_circuit(&circuit).await.unwrap();
    let rows = &out.floats["zz"];
    assert_eq!(rows.len(), 1);
    assert!((rows[0][0] + 1.0).abs() < 1e-10);
}

#[tokio::test]
async fn unknown_job_type_is_rejected() {
    let config = BackendConfig {
        job_type: "sample".to_string(),
        ..BackendConfig::default()
    };
    let err = ExecutionBackend::new(config, Arc::new(SimulatorEngine::new())).unwrap_err();
    assert!(matches!(err, BackendError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn zero_shots_return_reachable_states() {
    let mut circuit = Circuit::new();
    circuit += Operation::definition_bit("ro", 2, true);
    circuit += Operation::VariableMSXX {
        control: 0,
        target: 1,
        theta: (PI / 2.0).into(),
    };
    circuit += Operation::VariableMSXX {
        control: 0,
        target: 1,
        theta: (PI / 3.0).into(),
    };
    measure_all(&mut circuit, "ro", 2);

    let out = backend(2, 0, "SAMPLE").run_circuit(&circuit).await.unwrap();
    assert_eq!(out.bits["ro"], vec![vec![false, false], vec![true, true]]);
}

#[tokio::test]
async fn unsupported_operation_aborts_before_submission() {
    let mut circuit = Circuit::new();
    circuit += Operation::definition_bit("ro", 1, true);
    circuit += Operation::PragmaDamping {
        qubit: 0,
        gate_time: 1.0.into(),
        rate: 0.1.into(),
    };

    let err = backend(1, 1, "SAMPLE").run_circuit(&circuit).await.unwrap_err();
    assert!(matches!(err, BackendError::Translate(_)));
}

#[tokio::test]
async fn later_circuits_overwrite_registers() {
    let mut constant = Circuit::new();
    constant += Operation::definition_bit("ro", 1, true);

    let mut first = Circuit::new();
    measure_all(&mut first, "ro", 1);
    let mut second = Circuit::new();
    second += Operation::PauliX { qubit: 0 };
    measure_all(&mut second, "ro", 1);

    let measurement = ClassicalRegister::new(Some(constant), vec![first, second]);
    let backend = backend(1, 2, "SAMPLE");
    let out = backend.run_measurement_registers(&measurement).await.unwrap();
    assert_eq!(out.bits["ro"], vec![vec![true]; 2]);
    assert_eq!(backend.run_measurement(&measurement).await.unwrap(), None);
}

#[tokio::test]
async fn pauli_z_product_measurement() {
    // |10>: <Z0> = -1, <Z1> = 1, and in the X basis <X1> = 0
    let mut constant = Circuit::new();
    constant += Operation::PauliX { qubit: 0 };

    let mut z_basis = Circuit::new();
    z_basis += Operation::definition_bit("ro_z", 2, true);
    measure_all(&mut z_basis, "ro_z", 2);

    let mut x_basis = Circuit::new();
    x_basis += Operation::definition_bit("ro_x", 2, true);
    x_basis += Operation::Hadamard { qubit: 1 };
    measure_all(&mut x_basis, "ro_x", 2);

    let mut input = PauliZProductInput::new(2);
    let z0 = input.add_pauli_product("ro_z", vec![0]).unwrap();
    let z1 = input.add_pauli_product("ro_z", vec![1]).unwrap();
    let z0z1 = input.add_pauli_product("ro_z", vec![0, 1]).unwrap();
    let z0_again = input.add_pauli_product("ro_x", vec![0]).unwrap();

    let mut magnetization = FxHashMap::default();
    magnetization.insert(z0, 1.0);
    magnetization.insert(z1, 1.0);
    input.add_linear_exp_val("magnetization", magnetization).unwrap();
    let mut correlation = FxHashMap::default();
    correlation.insert(z0z1, 1.0);
    input.add_linear_exp_val("correlation", correlation).unwrap();
    let mut flipped = FxHashMap::default();
    flipped.insert(z0_again, -1.0);
    input.add_linear_exp_val("flipped", flipped).unwrap();

    let measurement = PauliZProduct::new(Some(constant), vec![z_basis, x_basis], input);
    let values = backend(2, 50, "SAMPLE")
        .run_measurement(&measurement)
        .await
        .unwrap()
        .unwrap();

    assert!(values["magnetization"].abs() < 1e-12);
    assert!((values["correlation"] + 1.0).abs() < 1e-12);
    assert!((values["flipped"] - 1.0).abs() < 1e-12);
}
