//! Integration tests for the pipeline occupancy tracker.

use pipeline_tracker::core::pipeline::{InstrId, Pipeline, Slot, Stage, STAGE_COUNT};

const A: InstrId = InstrId::new(0);
const B: InstrId = InstrId::new(1);
const C: InstrId = InstrId::new(2);

/// Asserts that every stage of `pipeline` is empty.
fn assert_all_empty(pipeline: &Pipeline<InstrId>) {
    for stage in Stage::ALL {
        assert_eq!(pipeline.get(stage), &Slot::Empty, "{} should be empty", stage);
        assert!(pipeline.is_empty(stage));
        assert!(!pipeline.is_bubble(stage));
        assert!(pipeline.is_empty_or_bubble(stage));
    }
    assert_eq!(pipeline.size(), 0);
}

/// Tests that a new tracker has every stage empty.
#[test]
fn test_new_pipeline_is_empty() {
    let pipeline: Pipeline<InstrId> = Pipeline::new();
    assert_all_empty(&pipeline);
    assert_eq!(Pipeline::<InstrId>::default(), pipeline);
}

/// Tests that a genuine instruction is visible through every query.
#[test]
fn test_set_instruction() {
    for stage in Stage::ALL {
        let mut pipeline = Pipeline::new();
        pipeline.set(stage, Slot::Occupied(A));

        assert_eq!(pipeline.get(stage), &Slot::Occupied(A));
        assert_eq!(pipeline.instruction(stage), Some(&A));
        assert!(!pipeline.is_empty(stage));
        assert!(!pipeline.is_bubble(stage));
        assert!(!pipeline.is_empty_or_bubble(stage));
        assert_eq!(pipeline.size(), 1);
    }
}

/// Tests that a bubble is present but does no useful work.
#[test]
fn test_set_bubble() {
    for stage in Stage::ALL {
        let mut pipeline: Pipeline<InstrId> = Pipeline::new();
        pipeline.set(stage, Slot::Bubble);

        assert!(pipeline.is_bubble(stage));
        assert!(!pipeline.is_empty(stage));
        assert!(pipeline.is_empty_or_bubble(stage));
        assert_eq!(pipeline.instruction(stage), None);
        assert_eq!(pipeline.size(), 1);
    }
}

/// Tests that set returns the previous occupant.
#[test]
fn test_set_returns_previous() {
    let mut pipeline = Pipeline::new();

    assert_eq!(pipeline.set(Stage::Ex, Slot::Occupied(A)), Slot::Empty);
    assert_eq!(pipeline.set(Stage::Ex, Slot::Bubble), Slot::Occupied(A));
    assert_eq!(pipeline.set(Stage::Ex, Slot::Occupied(B)), Slot::Bubble);
    assert_eq!(pipeline.set(Stage::Ex, Slot::Empty), Slot::Occupied(B));
    assert!(pipeline.is_empty(Stage::Ex));
}

/// Tests that the shortcut accessors match get/set on their stage.
#[test]
fn test_shortcut_accessors() {
    let mut pipeline = Pipeline::new();

    assert_eq!(pipeline.set_fetch(Slot::Occupied(A)), Slot::Empty);
    assert_eq!(pipeline.set_decode(Slot::Bubble), Slot::Empty);
    assert_eq!(pipeline.set_execute(Slot::Occupied(B)), Slot::Empty);
    assert_eq!(pipeline.set_memory(Slot::Occupied(C)), Slot::Empty);
    assert_eq!(pipeline.set_writeback(Slot::Bubble), Slot::Empty);

    assert_eq!(pipeline.fetch(), pipeline.get(Stage::If));
    assert_eq!(pipeline.decode(), pipeline.get(Stage::Id));
    assert_eq!(pipeline.execute(), pipeline.get(Stage::Ex));
    assert_eq!(pipeline.memory(), pipeline.get(Stage::Mem));
    assert_eq!(pipeline.writeback(), pipeline.get(Stage::Wb));

    assert_eq!(pipeline.fetch(), &Slot::Occupied(A));
    assert_eq!(pipeline.set_writeback(Slot::Empty), Slot::Bubble);
    assert_eq!(pipeline.size(), 4);
}

/// Tests that clear empties every stage and is idempotent.
#[test]
fn test_clear() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::If, Slot::Occupied(A));
    pipeline.set(Stage::Id, Slot::Bubble);
    pipeline.set(Stage::Wb, Slot::Occupied(C));

    pipeline.clear();
    assert_all_empty(&pipeline);

    pipeline.clear();
    assert_all_empty(&pipeline);
}

/// Tests that size tracks the number of non-empty stages.
#[test]
fn test_size_counts_present_stages() {
    let mut pipeline = Pipeline::new();
    let mut expected = 0;

    for (i, stage) in Stage::ALL.into_iter().enumerate() {
        let slot = if i % 2 == 0 {
            Slot::Occupied(InstrId::new(i as u32))
        } else {
            Slot::Bubble
        };
        pipeline.set(stage, slot);
        expected += 1;
        assert_eq!(pipeline.size(), expected);
    }
    assert_eq!(pipeline.size(), STAGE_COUNT);

    // Overwriting a present stage does not change the count.
    pipeline.set(Stage::Ex, Slot::Bubble);
    assert_eq!(pipeline.size(), STAGE_COUNT);

    for stage in Stage::ALL.into_iter().rev() {
        pipeline.set(stage, Slot::Empty);
        expected -= 1;
        assert_eq!(pipeline.size(), expected);
    }
}

/// Tests that mutating one stage leaves every other stage untouched.
#[test]
fn test_stage_independence() {
    let mut pipeline = Pipeline::new();
    for stage in Stage::ALL {
        pipeline.set(stage, Slot::Occupied(InstrId::new(stage.index() as u32)));
    }

    for target in Stage::ALL {
        let before = pipeline.clone();
        pipeline.set(target, Slot::Bubble);

        for other in Stage::ALL.into_iter().filter(|s| *s != target) {
            assert_eq!(pipeline.get(other), before.get(other));
            assert_eq!(pipeline.is_empty(other), before.is_empty(other));
            assert_eq!(pipeline.is_bubble(other), before.is_bubble(other));
        }

        pipeline.set(target, Slot::Occupied(InstrId::new(target.index() as u32)));
    }
}

/// Tests the reference scenario of a fetched instruction followed by a stall.
#[test]
fn test_fetch_then_bubble_scenario() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::If, Slot::Occupied(A));
    pipeline.set(Stage::Id, Slot::Bubble);

    assert_eq!(pipeline.size(), 2);
    assert!(pipeline.is_empty(Stage::Ex));
    assert!(pipeline.is_bubble(Stage::Id));
    assert!(pipeline.is_empty_or_bubble(Stage::Mem));
    assert_eq!(pipeline.get(Stage::If), &Slot::Occupied(A));
}

/// Tests that the raw view aliases the tracker's state.
#[test]
fn test_raw_view_aliases_state() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::Mem, Slot::Occupied(B));

    assert_eq!(pipeline.raw()[Stage::Mem.index()], Slot::Occupied(B));
    assert_eq!(pipeline.raw().len(), STAGE_COUNT);

    pipeline.raw_mut()[Stage::If.index()] = Slot::Bubble;
    assert!(pipeline.is_bubble(Stage::If));
    assert_eq!(pipeline.size(), 2);
}

/// Tests that iteration follows flow order.
#[test]
fn test_iter_in_flow_order() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::Wb, Slot::Occupied(C));

    let stages: Vec<Stage> = pipeline.iter().map(|(stage, _)| stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());

    let last = pipeline.iter().last();
    assert_eq!(last, Some((Stage::Wb, &Slot::Occupied(C))));
}

/// Tests the one-line diagram rendering.
#[test]
fn test_display_diagram() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::If, Slot::Occupied(InstrId::new(3)));
    pipeline.set(Stage::Id, Slot::Bubble);
    pipeline.set(Stage::Wb, Slot::Occupied(InstrId::new(1)));

    assert_eq!(
        pipeline.to_string(),
        "IF:#3 | ID:bubble | EX:- | MEM:- | WB:#1"
    );
}

/// Tests mapping handles to names and indexing by stage.
#[test]
fn test_map_and_index() {
    let pool = ["DADDI R1,R0,8", "LD R2,0(R1)"];
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::Id, Slot::Occupied(A));
    pipeline.set(Stage::Ex, Slot::Bubble);
    pipeline.set(Stage::If, Slot::Occupied(B));

    let named = pipeline.map(|id| pool[id.index()]);
    assert_eq!(named[Stage::Id], Slot::Occupied("DADDI R1,R0,8"));
    assert_eq!(named[Stage::If], Slot::Occupied("LD R2,0(R1)"));
    assert!(named.is_bubble(Stage::Ex));
    assert!(named.is_empty(Stage::Wb));
    assert_eq!(named.size(), pipeline.size());
}

/// Tests the JSON view of the pipeline.
#[test]
fn test_serialize_json() {
    let mut pipeline = Pipeline::new();
    pipeline.set(Stage::If, Slot::Occupied("DADD R3,R2,R1"));
    pipeline.set(Stage::Ex, Slot::Bubble);

    let value = serde_json::to_value(&pipeline).unwrap();
    assert_eq!(value["IF"]["state"], "occupied");
    assert_eq!(value["IF"]["instr"], "DADD R3,R2,R1");
    assert_eq!(value["ID"]["state"], "empty");
    assert_eq!(value["EX"]["state"], "bubble");
    assert_eq!(value.as_object().unwrap().len(), STAGE_COUNT);
}
