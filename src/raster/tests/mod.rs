mod world_file_tests;
