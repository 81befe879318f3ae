//! Resolution of decoded literals into references to existing nodes.

use crate::aig::{Aig, AndGate, Decoded, Latch, Literal, NodeId, NodeKind, Output, Signal};
use crate::error::{Error, Owner, Result};

/// Maps each variable to the category of the node owning it.
///
/// Variable 0 is the constant and never gets an entry.
struct NodeTable(Vec<Option<NodeKind>>);

impl NodeTable {
    fn build(aig: &Decoded) -> Self {
        let mut table = vec![None; 1 + aig.inputs.len() + aig.latches.len() + aig.and_gates.len()];

        let ids = aig
            .inputs
            .iter()
            .map(|input| (input.id, NodeKind::Input))
            .chain(aig.latches.iter().map(|latch| (latch.id, NodeKind::Latch)))
            .chain(aig.and_gates.iter().map(|gate| (gate.id, NodeKind::AndGate)));

        for (id, kind) in ids {
            table[id.index()] = Some(kind);
        }

        Self(table)
    }

    fn resolve(&self, owner: Owner, literal: Literal) -> Result<Signal> {
        let inverted = literal.is_inverted();
        let variable = literal.variable();

        if variable == 0 {
            return Ok(Signal { node: NodeId::FALSE, inverted });
        }

        let node = u32::try_from(variable)
            .ok()
            .map(NodeId::new)
            .filter(|id| matches!(self.0.get(id.index()), Some(Some(_))))
            .ok_or(Error::DanglingReference { owner, target: variable })?;

        Ok(Signal { node, inverted })
    }
}

/// Resolves every literal of a decoded graph.
///
/// # Errors
///
/// Returns [`Error::DanglingReference`] if a latch, AND gate or output references a variable no node defines,
/// and [`Error::ForwardReference`] if an AND gate references a variable that is not strictly smaller than its
/// own.
pub fn link(decoded: Decoded) -> Result<Aig> {
    let table = NodeTable::build(&decoded);

    let Decoded {
        max_var,
        inputs,
        latches,
        outputs,
        and_gates,
        symbols,
        comments,
    } = decoded;

    let and_gates = and_gates
        .into_iter()
        .map(|gate| -> Result<AndGate> {
            let owner = Owner::AndGate(gate.id.get());
            let fanin = [table.resolve(owner, gate.fanin[0])?, table.resolve(owner, gate.fanin[1])?];

            if let Some(late) = fanin.iter().find(|signal| signal.node >= gate.id) {
                return Err(Error::ForwardReference {
                    gate: gate.id.get(),
                    target: u64::from(late.node.get()),
                });
            }

            Ok(AndGate { id: gate.id, fanin })
        })
        .collect::<Result<Vec<_>>>()?;

    let latches = latches
        .into_iter()
        .map(|latch| -> Result<Latch> {
            let next = table.resolve(Owner::Latch(latch.id.get()), latch.next)?;
            Ok(Latch { id: latch.id, next })
        })
        .collect::<Result<Vec<_>>>()?;

    let outputs = outputs
        .into_iter()
        .enumerate()
        .map(|(index, output)| -> Result<Output> {
            let driver = table.resolve(Owner::Output(index), output.driver)?;
            Ok(Output { driver })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "linked {} latches, {} AND gates and {} outputs",
        latches.len(),
        and_gates.len(),
        outputs.len()
    );

    Ok(Aig {
        max_var,
        inputs,
        latches,
        outputs,
        and_gates,
        symbols,
        comments,
    })
}

/// Turns a linked graph back into its literal form.
///
/// Linking the result yields a graph equal to `aig`.
#[must_use]
pub fn unlink(aig: &Aig) -> Decoded {
    Decoded {
        max_var: aig.max_var,
        inputs: aig.inputs.clone(),
        latches: aig
            .latches
            .iter()
            .map(|latch| Latch {
                id: latch.id,
                next: latch.next.literal(),
            })
            .collect(),
        outputs: aig
            .outputs
            .iter()
            .map(|output| Output {
                driver: output.driver.literal(),
            })
            .collect(),
        and_gates: aig
            .and_gates
            .iter()
            .map(|gate| AndGate {
                id: gate.id,
                fanin: [gate.fanin[0].literal(), gate.fanin[1].literal()],
            })
            .collect(),
        symbols: aig.symbols.clone(),
        comments: aig.comments.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{link, unlink};
    use crate::aig::{NodeId, Signal};
    use crate::decode::{decode, read};
    use crate::error::{Error, Owner};

    #[test]
    fn resolves_to_existing_nodes() {
        let aig = link(decode(&b"aig 3 2 0 1 1\n6\n\x02\x02"[..]).unwrap()).unwrap();

        assert_eq!(
            aig.and_gates()[0].fanin,
            [
                Signal { node: NodeId::new(2), inverted: false },
                Signal { node: NodeId::new(1), inverted: false }
            ]
        );
        assert_eq!(aig.outputs()[0].driver, Signal { node: NodeId::new(3), inverted: false });
    }

    #[test]
    fn constants_need_no_node() {
        // Output 0 is constant true; the gate ANDs input 1 with constant false.
        let aig = link(decode(&b"aig 2 1 0 1 1\n1\n\x02\x02"[..]).unwrap()).unwrap();

        assert!(aig.outputs()[0].driver.is_constant());
        assert!(aig.outputs()[0].driver.inverted);
        assert_eq!(aig.and_gates()[0].fanin[1], Signal { node: NodeId::FALSE, inverted: false });
    }

    #[test]
    fn latch_feedback_is_allowed() {
        let aig = link(decode(&b"aig 3 1 1 1 1\n7\n6\n\x02\x02"[..]).unwrap()).unwrap();
        assert_eq!(aig.latches()[0].next, Signal { node: NodeId::new(3), inverted: true });
    }

    #[test]
    fn output_beyond_max_var() {
        match link(decode(&b"aig 3 2 0 1 1\n8\n\x02\x02"[..]).unwrap()) {
            Err(Error::DanglingReference { owner, target }) => {
                assert_eq!(owner, Owner::Output(0));
                assert_eq!(target, 4);
            }
            other => panic!("expected a dangling reference, got {:?}", other),
        }
    }

    #[test]
    fn latch_beyond_max_var() {
        assert!(matches!(
            link(decode(&b"aig 1 0 1 0 0\n40\n"[..]).unwrap()),
            Err(Error::DanglingReference { owner: Owner::Latch(1), target: 20 })
        ));
    }

    #[test]
    fn huge_literal_is_dangling() {
        assert!(matches!(
            link(decode(&b"aig 0 0 0 1 0\n18446744073709551615\n"[..]).unwrap()),
            Err(Error::DanglingReference { owner: Owner::Output(0), .. })
        ));
    }

    #[test]
    fn gate_reading_a_later_gate() {
        // Binary deltas cannot express this; the ASCII form can.
        let decoded = read(&b"aag 4 2 0 1 2\n2\n4\n8\n6 8 2\n8 4 2\n"[..]).unwrap();

        assert!(matches!(link(decoded), Err(Error::ForwardReference { gate: 3, target: 4 })));
    }

    #[test]
    fn unlink_then_link_is_identity() {
        let aig = link(decode(&b"aig 4 1 1 2 2\n9\n8\n5\n\x02\x01\x02\x03"[..]).unwrap()).unwrap();
        assert_eq!(link(unlink(&aig)).unwrap(), aig);
    }
}
