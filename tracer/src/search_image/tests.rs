use super::*;

const TYPES: [SearchImageType; 2] = [SearchImageType::Dense, SearchImageType::Sparse];

#[test]
fn test_new_slice_then_get_slice_is_same_instance() {
    for image_type in TYPES {
        let mut stack: SearchImageStack<u32> = SearchImageStack::new(8, 6, image_type).unwrap();
        let created: *const SearchSlice<u32> = stack.new_slice(3);
        let fetched = stack.get_slice(3).unwrap();
        assert!(std::ptr::eq(created, fetched));
        assert_eq!(fetched.image_type(), image_type);
    }
}

#[test]
fn test_key_set_only_lists_touched_slices() {
    let mut stack: SearchImageStack<u32> =
        SearchImageStack::new(4, 4, SearchImageType::Sparse).unwrap();
    assert!(stack.key_set().is_empty());
    assert!(stack.get_slice(0).is_none());

    stack.set_node(Voxel::new(1, 1, 7), 5);
    stack.slice_or_create(2);
    assert!(stack.node(Voxel::new(1, 1, 5)).is_none());

    assert_eq!(stack.key_set().into_iter().collect::<Vec<_>>(), vec![2, 7]);
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_new_slice_replaces_existing() {
    let mut stack: SearchImageStack<u32> =
        SearchImageStack::new(4, 4, SearchImageType::Dense).unwrap();
    stack.set_node(Voxel::new(0, 0, 1), 9);
    assert_eq!(stack.total_nodes(), 1);

    stack.new_slice(1);
    assert!(stack.node(Voxel::new(0, 0, 1)).is_none());
    assert_eq!(stack.total_nodes(), 0);
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_set_get_and_mutate_nodes() {
    for image_type in TYPES {
        let mut stack: SearchImageStack<f64> = SearchImageStack::new(5, 3, image_type).unwrap();
        let voxel = Voxel::new(4, 2, -1);
        stack.set_node(voxel, 1.5);
        assert_eq!(stack.node(voxel), Some(&1.5));

        *stack.node_mut(voxel).unwrap() = 2.5;
        assert_eq!(stack.node(voxel), Some(&2.5));

        // overwriting does not double count
        stack.set_node(voxel, 3.5);
        assert_eq!(stack.total_nodes(), 1);
    }
}

#[test]
fn test_out_of_extent_voxels_are_absent() {
    for image_type in TYPES {
        let mut stack: SearchImageStack<u8> = SearchImageStack::new(2, 2, image_type).unwrap();
        stack.set_node(Voxel::new(2, 0, 0), 1);
        stack.set_node(Voxel::new(-1, 0, 0), 1);
        assert_eq!(stack.total_nodes(), 0);
        assert!(stack.node(Voxel::new(5, 5, 0)).is_none());
        assert!(stack.node_mut(Voxel::new(0, -3, 0)).is_none());
    }
}

#[test]
fn test_iter_yields_stored_cells() {
    for image_type in TYPES {
        let mut slice: SearchSlice<char> = SearchSlice::new(image_type, 3, 3);
        assert!(slice.is_empty());
        slice.set_value(0, 0, 'a');
        slice.set_value(2, 1, 'b');
        slice.set_value(1, 2, 'c');

        let mut cells: Vec<_> = slice.iter().map(|(x, y, v)| (x, y, *v)).collect();
        cells.sort();
        assert_eq!(cells, vec![(0, 0, 'a'), (1, 2, 'c'), (2, 1, 'b')]);
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.get_value(2, 2), None);
        assert_eq!(slice.get_value(9, 0), None);
    }
}

#[test]
fn test_nodes_reports_voxels() {
    let mut stack: SearchImageStack<u8> =
        SearchImageStack::new(3, 3, SearchImageType::Sparse).unwrap();
    stack.set_node(Voxel::new(1, 2, 4), 1);
    stack.set_node(Voxel::new(0, 1, -2), 2);

    let mut nodes: Vec<_> = stack.nodes().map(|(v, &n)| (v, n)).collect();
    nodes.sort();
    assert_eq!(
        nodes,
        vec![(Voxel::new(0, 1, -2), 2), (Voxel::new(1, 2, 4), 1)]
    );
}

#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(
        SearchImageStack::<u8>::new(0, 4, SearchImageType::Dense),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(SearchImageStack::<u8>::new(4, 0, SearchImageType::Sparse).is_err());
}

#[test]
fn test_for_occupancy() {
    assert_eq!(
        SearchImageType::for_occupancy(0.9).unwrap(),
        SearchImageType::Dense
    );
    assert_eq!(
        SearchImageType::for_occupancy(DENSE_OCCUPANCY_THRESHOLD).unwrap(),
        SearchImageType::Dense
    );
    assert_eq!(
        SearchImageType::for_occupancy(0.01).unwrap(),
        SearchImageType::Sparse
    );
    assert!(SearchImageType::for_occupancy(1.5).is_err());
    assert!(SearchImageType::for_occupancy(f64::NAN).is_err());
}
