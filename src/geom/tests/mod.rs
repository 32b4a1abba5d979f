mod test_mesh_sanity;
