mod robots_parser_tests;
