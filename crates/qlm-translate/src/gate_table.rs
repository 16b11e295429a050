//! Static table of operations with a native target gate.

use std::sync::LazyLock;

use qlm_ir::QubitRole;
use rustc_hash::FxHashMap;

use crate::target::TargetGate;

/// How one named operation maps onto the target instruction set.
#[derive(Debug, Clone, Copy)]
pub struct GateSpec {
    /// Operation name, as returned by `Operation::name`.
    pub name: &'static str,
    /// Builds the target gate from the resolved parameters, in `parameters` order.
    pub constructor: fn(&[f64]) -> TargetGate,
    /// Qubit operands in target operand order.
    pub qubits: &'static [QubitRole],
    /// Parameters consumed by `constructor`, in order.
    pub parameters: &'static [&'static str],
}

impl GateSpec {
    /// Number of qubit operands.
    pub fn arity(&self) -> usize {
        self.qubits.len()
    }
}

const SINGLE: &[QubitRole] = &[QubitRole::Qubit];
const PAIR: &[QubitRole] = &[QubitRole::Control, QubitRole::Target];
const TRIPLE: &[QubitRole] = &[QubitRole::Control0, QubitRole::Control1, QubitRole::Target];
const THETA: &[&str] = &["theta"];

static GATE_TABLE: LazyLock<FxHashMap<&'static str, GateSpec>> = LazyLock::new(|| {
    let specs = [
        GateSpec {
            name: "RotateX",
            constructor: |p| TargetGate::Rx(p[0]),
            qubits: SINGLE,
            parameters: THETA,
        },
        GateSpec {
            name: "RotateY",
            constructor: |p| TargetGate::Ry(p[0]),
            qubits: SINGLE,
            parameters: THETA,
        },
        GateSpec {
            name: "RotateZ",
            constructor: |p| TargetGate::Rz(p[0]),
            qubits: SINGLE,
            parameters: THETA,
        },
        GateSpec {
            name: "Hadamard",
            constructor: |_| TargetGate::H,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "PauliX",
            constructor: |_| TargetGate::X,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "PauliY",
            constructor: |_| TargetGate::Y,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "PauliZ",
            constructor: |_| TargetGate::Z,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "SGate",
            constructor: |_| TargetGate::S,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "TGate",
            constructor: |_| TargetGate::T,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "PhaseShiftState1",
            constructor: |p| TargetGate::Ph(p[0]),
            qubits: SINGLE,
            parameters: THETA,
        },
        GateSpec {
            name: "Identity",
            constructor: |_| TargetGate::I,
            qubits: SINGLE,
            parameters: &[],
        },
        GateSpec {
            name: "CNOT",
            constructor: |_| TargetGate::Cnot,
            qubits: PAIR,
            parameters: &[],
        },
        GateSpec {
            name: "ControlledPauliY",
            constructor: |_| TargetGate::controlled(TargetGate::Y),
            qubits: PAIR,
            parameters: &[],
        },
        GateSpec {
            name: "ControlledPauliZ",
            constructor: |_| TargetGate::Csign,
            qubits: PAIR,
            parameters: &[],
        },
        GateSpec {
            name: "SWAP",
            constructor: |_| TargetGate::Swap,
            qubits: PAIR,
            parameters: &[],
        },
        GateSpec {
            name: "ISwap",
            constructor: |_| TargetGate::ISwap,
            qubits: PAIR,
            parameters: &[],
        },
        GateSpec {
            name: "ControlledPhaseShift",
            constructor: |p| TargetGate::controlled(TargetGate::Ph(p[0])),
            qubits: PAIR,
            parameters: THETA,
        },
        GateSpec {
            name: "Toffoli",
            constructor: |_| TargetGate::Ccnot,
            qubits: TRIPLE,
            parameters: &[],
        },
    ];
    specs.into_iter().map(|spec| (spec.name, spec)).collect()
});

/// Look up the native gate entry for an operation name.
pub fn lookup(name: &str) -> Option<&'static GateSpec> {
    GATE_TABLE.get(name)
}

/// Iterate over every entry of the table.
pub fn entries() -> impl Iterator<Item = &'static GateSpec> {
    GATE_TABLE.values()
}
