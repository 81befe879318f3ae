//! Builds binary AIGER streams for the integration tests.

#![allow(dead_code)]

/// A circuit described by literals, in the canonical variable layout.
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    pub inputs: u32,
    /// Next-state literal of each latch.
    pub latches: Vec<u64>,
    /// Literal of each output.
    pub outputs: Vec<u64>,
    /// Fan-in literals of each AND gate; both must be below the gate's own literal.
    pub ands: Vec<(u64, u64)>,
    /// Raw symbol table and comment lines appended after the AND section.
    pub trailer: Vec<String>,
}

impl Circuit {
    pub fn max_var(&self) -> u64 {
        u64::from(self.inputs) + self.latches.len() as u64 + self.ands.len() as u64
    }

    /// Literal of the `index`-th AND gate.
    pub fn and_literal(&self, index: usize) -> u64 {
        2 * (u64::from(self.inputs) + self.latches.len() as u64 + 1 + index as u64)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = format!(
            "aig {} {} {} {} {}\n",
            self.max_var(),
            self.inputs,
            self.latches.len(),
            self.outputs.len(),
            self.ands.len()
        )
        .into_bytes();

        for literal in self.latches.iter().chain(&self.outputs) {
            bytes.extend(format!("{}\n", literal).into_bytes());
        }

        for (index, &(a, b)) in self.ands.iter().enumerate() {
            let lhs = self.and_literal(index);
            let (rhs0, rhs1) = if a >= b { (a, b) } else { (b, a) };
            assert!(rhs0 < lhs, "AND gate {} references literal {} >= {}", index, rhs0, lhs);
            push_delta(&mut bytes, lhs - rhs0);
            push_delta(&mut bytes, rhs0 - rhs1);
        }

        for line in &self.trailer {
            bytes.extend(format!("{}\n", line).into_bytes());
        }

        bytes
    }
}

pub fn push_delta(bytes: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        bytes.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    bytes.push(value as u8);
}

/// 256 inputs, 129 outputs and 1020 AND gates, 255 of which form one chain.
///
/// Gates `0..255` are the chain (gate `k` at level `k + 1`); the remaining 765 each AND two inputs and sit at
/// level 1.
pub fn wide_chain() -> Circuit {
    let mut circuit = Circuit {
        inputs: 256,
        ..Circuit::default()
    };

    circuit.ands.push((2, 4));
    for k in 1..255_u64 {
        let previous = circuit.and_literal(k as usize - 1);
        circuit.ands.push((previous, 2 * (k + 2)));
    }
    for j in 0..765_u64 {
        let a = 2 * (j % 256 + 1);
        let b = 2 * ((j * 7 + 3) % 256 + 1) + 1;
        circuit.ands.push((a, b));
    }

    circuit.outputs.push(circuit.and_literal(254));
    for j in 0..128 {
        circuit.outputs.push(circuit.and_literal(255 + j * 5) + (j as u64 & 1));
    }

    circuit
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
