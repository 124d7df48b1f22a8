mod dxf_reader_tests;
