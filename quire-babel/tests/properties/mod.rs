mod totality;
