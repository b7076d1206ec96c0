use flowgraph::{BlockId, EdgeError, FlowGraph, StateViolation, TargetList};
use proptest::prelude::*;

const BLOCKS: usize = 6;
const OWNER: BlockId = BlockId(0);

#[derive(Debug, Clone)]
enum Operation {
    Push(usize),
    Insert(usize, usize),
    Set(usize, usize),
    RemoveAt(usize),
    Remove(usize),
    Clear,
}

fn operation() -> impl Strategy<Value = Operation> {
    let target = 0..BLOCKS;
    let index = 0..8usize;
    prop_oneof![
        4 => target.clone().prop_map(Operation::Push),
        2 => (index.clone(), target.clone()).prop_map(|(i, t)| Operation::Insert(i, t)),
        2 => (index.clone(), target.clone()).prop_map(|(i, t)| Operation::Set(i, t)),
        2 => index.prop_map(Operation::RemoveAt),
        2 => target.prop_map(Operation::Remove),
        1 => Just(Operation::Clear),
    ]
}

fn assert_accounting(graph: &FlowGraph, model: &[BlockId]) {
    assert_eq!(graph.targets(OWNER).unwrap().as_slice(), model);
    for t in 0..BLOCKS {
        let target = BlockId(t);
        let occurrences = model.iter().filter(|&&b| b == target).count();
        assert_eq!(
            graph.ledger().multiplicity(target, OWNER),
            occurrences,
            "multiplicity mismatch for {:?}",
            target
        );
    }
    graph.check_consistency().unwrap();
}

proptest! {
    #[test]
    fn test_ledger_matches_list_contents(
        initial in proptest::collection::vec(0..BLOCKS, 0..5),
        ops in proptest::collection::vec(operation(), 1..60),
    ) {
        let mut model: Vec<BlockId> = initial.into_iter().map(BlockId).collect();
        let mut graph = FlowGraph::with_blocks(BLOCKS);
        graph.attach_switch(OWNER, TargetList::from(model.clone())).unwrap();
        assert_accounting(&graph, &model);

        for op in ops {
            let mut targets = graph.targets_mut(OWNER).unwrap();
            let len = model.len();
            match op {
                Operation::Push(t) => {
                    targets.push(BlockId(t)).unwrap();
                    model.push(BlockId(t));
                }
                Operation::Insert(i, t) => {
                    let res = targets.insert(i, BlockId(t));
                    if i <= len {
                        res.unwrap();
                        model.insert(i, BlockId(t));
                    } else {
                        prop_assert_eq!(res, Err(EdgeError::IndexOutOfRange { index: i, len }));
                    }
                }
                Operation::Set(i, t) => {
                    let res = targets.set(i, BlockId(t));
                    if i < len {
                        prop_assert_eq!(res, Ok(model[i]));
                        model[i] = BlockId(t);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Operation::RemoveAt(i) => {
                    let res = targets.remove_at(i);
                    if i < len {
                        prop_assert_eq!(res, Ok(model.remove(i)));
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Operation::Remove(t) => {
                    let found = model.iter().position(|&b| b == BlockId(t));
                    prop_assert_eq!(targets.remove(BlockId(t)), Ok(found.is_some()));
                    if let Some(i) = found {
                        model.remove(i);
                    }
                }
                Operation::Clear => {
                    targets.clear().unwrap();
                    model.clear();
                }
            }
            assert_accounting(&graph, &model);
        }
    }
}

#[test]
fn test_unattached_list_fails_before_change() {
    #[derive(Default)]
    struct Silent(usize);

    impl flowgraph::EdgeObserver for Silent {
        fn on_edge_changed(
            &mut self,
            _owner: BlockId,
            _old: Option<BlockId>,
            _new: Option<BlockId>,
        ) -> flowgraph::Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    let mut observer = Silent::default();
    let mut list = TargetList::from_iter([BlockId(1), BlockId(2)]);

    assert_eq!(
        list.push(&mut observer, BlockId(3)),
        Err(EdgeError::IllegalState(StateViolation::Unattached))
    );
    assert_eq!(
        list.clear(&mut observer),
        Err(EdgeError::IllegalState(StateViolation::Unattached))
    );
    assert_eq!(list.as_slice(), &[BlockId(1), BlockId(2)]);
    assert_eq!(observer.0, 0);
}

#[test]
fn test_remove_then_push_passes_through_zero() {
    let mut graph: FlowGraph = "blocks 3\nswitch 0 1 2".parse().unwrap();

    let mut targets = graph.targets_mut(BlockId(0)).unwrap();
    assert!(targets.remove(BlockId(1)).unwrap());
    drop(targets);
    assert_eq!(graph.ledger().multiplicity(BlockId(1), BlockId(0)), 0);
    assert!(graph.predecessors(BlockId(1)).unwrap().is_empty());

    graph.targets_mut(BlockId(0)).unwrap().push(BlockId(1)).unwrap();
    assert_eq!(graph.ledger().multiplicity(BlockId(1), BlockId(0)), 1);
    assert_eq!(
        graph.targets(BlockId(0)).unwrap().as_slice(),
        &[BlockId(2), BlockId(1)]
    );
}

#[test]
fn test_round_trip_through_buffer() {
    let source = vec![BlockId(2), BlockId(3), BlockId(4)];
    let list = TargetList::from_source(Some(source.clone())).unwrap();

    let mut buffer = vec![BlockId(0); list.len()];
    list.copy_into(&mut buffer, 0).unwrap();
    assert_eq!(buffer, source);
}

#[test]
fn test_absent_source() {
    assert_eq!(
        TargetList::from_source(None::<Vec<BlockId>>),
        Err(EdgeError::InvalidArgument)
    );
}
